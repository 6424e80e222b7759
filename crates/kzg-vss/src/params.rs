//! Sharing parameters: threshold degree and prime modulus
//!
//! Both values travel as decimal text. `parse` and the `*_text` accessors
//! are exact inverses for canonical input.

use num_bigint::BigUint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::PrimeField;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharingParams {
    /// Polynomial degree; `degree + 1` shares are needed to reconstruct
    pub degree: usize,
    pub modulus: BigUint,
}

impl SharingParams {
    pub fn new(degree: usize, modulus: BigUint) -> Result<Self> {
        // validates the modulus range
        PrimeField::new(modulus.clone())?;
        Ok(Self { degree, modulus })
    }

    /// Parameters matching a group backend's scalar field
    pub fn for_field(degree: usize, field: &PrimeField) -> Self {
        Self {
            degree,
            modulus: field.modulus().clone(),
        }
    }

    /// Parse a decimal degree and a decimal modulus.
    ///
    /// Negative, signed or non-decimal degrees are rejected with
    /// [`Error::InvalidDegree`].
    pub fn parse(degree_text: &str, modulus_text: &str) -> Result<Self> {
        let degree_text = degree_text.trim();
        if degree_text.is_empty() || !degree_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDegree(format!(
                "expected a non-negative decimal integer, got {:?}",
                degree_text
            )));
        }
        let degree = degree_text
            .parse::<usize>()
            .map_err(|e| Error::InvalidDegree(format!("{}: {:?}", e, degree_text)))?;

        let field = PrimeField::from_decimal(modulus_text)?;
        Ok(Self {
            degree,
            modulus: field.modulus().clone(),
        })
    }

    pub fn degree_text(&self) -> String {
        self.degree.to_string()
    }

    pub fn modulus_text(&self) -> String {
        self.modulus.to_str_radix(10)
    }

    pub fn field(&self) -> Result<PrimeField> {
        PrimeField::new(self.modulus.clone())
    }

    /// Minimum number of shares for reconstruction
    pub fn threshold(&self) -> usize {
        self.degree + 1
    }
}
