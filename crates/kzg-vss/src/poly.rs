//! Polynomials over a prime field
//!
//! Coefficients are stored in ascending degree order and always lie in
//! [0, p). The stored degree is `coefficients.len() - 1`; trailing zeros are
//! kept until [`FieldPolynomial::trim`] is called so that the text form
//! round-trips exactly. Equality compares trimmed forms.
//!
//! Text form: `[c0, c1, ..., cd]` with decimal coefficients.

use core::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::RngCore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::field::{parse_decimal, PrimeField};

#[derive(Clone, Debug)]
pub struct FieldPolynomial {
    field: PrimeField,
    coefficients: Vec<BigUint>,
}

impl FieldPolynomial {
    /// The zero polynomial with `degree + 1` zero coefficients.
    pub fn zero(field: &PrimeField, degree: usize) -> Self {
        Self {
            field: field.clone(),
            coefficients: vec![BigUint::zero(); degree + 1],
        }
    }

    /// Reduce arbitrary integers coefficient-wise into the field.
    pub fn from_coefficients(field: &PrimeField, coefficients: Vec<BigUint>) -> Self {
        if coefficients.is_empty() {
            return Self::zero(field, 0);
        }
        let coefficients = coefficients.iter().map(|c| field.reduce(c)).collect();
        Self {
            field: field.clone(),
            coefficients,
        }
    }

    pub fn from_u64s(field: &PrimeField, coefficients: &[u64]) -> Self {
        Self::from_coefficients(field, coefficients.iter().map(|&c| BigUint::from(c)).collect())
    }

    /// Uniformly random coefficients of exactly `degree + 1` terms.
    ///
    /// Seeded generators give reproducible polynomials for tests only; a
    /// dealer must use a cryptographically secure source.
    pub fn random<R: RngCore + ?Sized>(field: &PrimeField, degree: usize, rng: &mut R) -> Self {
        let coefficients = (0..=degree).map(|_| field.random(rng)).collect();
        Self {
            field: field.clone(),
            coefficients,
        }
    }

    /// The monic linear polynomial `x - root`.
    pub fn linear(field: &PrimeField, root: &BigUint) -> Self {
        Self {
            field: field.clone(),
            coefficients: vec![field.neg(root), field.one()],
        }
    }

    /// Parse the `[c0, c1, ..., cd]` text form.
    pub fn parse(field: &PrimeField, text: &str) -> Result<Self> {
        let inner = text
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| Error::MalformedPolynomial("expected [c0, c1, ...]".into()))?;

        if inner.trim().is_empty() {
            return Err(Error::MalformedPolynomial("no coefficients".into()));
        }

        let mut coefficients = Vec::new();
        for (i, token) in inner.split(',').enumerate() {
            let token = token.trim();
            let value = parse_decimal(token).ok_or_else(|| {
                Error::MalformedPolynomial(format!("coefficient {} is not decimal: {:?}", i, token))
            })?;
            if !field.contains(&value) {
                return Err(Error::MalformedPolynomial(format!(
                    "coefficient {} is not reduced modulo p",
                    i
                )));
            }
            coefficients.push(value);
        }

        Ok(Self {
            field: field.clone(),
            coefficients,
        })
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    pub fn coefficient(&self, index: usize) -> Result<&BigUint> {
        self.coefficients.get(index).ok_or(Error::IndexOutOfRange {
            index,
            degree: self.degree(),
        })
    }

    /// Set a coefficient, growing the polynomial with zeros if needed.
    pub fn set_coefficient(&mut self, index: usize, value: &BigUint) {
        if index >= self.coefficients.len() {
            self.coefficients.resize(index + 1, BigUint::zero());
        }
        self.coefficients[index] = self.field.reduce(value);
    }

    pub fn constant(&self) -> &BigUint {
        &self.coefficients[0]
    }

    pub fn set_constant(&mut self, value: &BigUint) {
        self.coefficients[0] = self.field.reduce(value);
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_zero())
    }

    /// Degree ignoring trailing zero coefficients (0 for the zero polynomial)
    pub fn effective_degree(&self) -> usize {
        self.coefficients
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    /// Drop trailing zero coefficients, keeping at least the constant term.
    pub fn trim(&mut self) {
        let len = self.effective_degree() + 1;
        self.coefficients.truncate(len);
    }

    fn check_field(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::FieldMismatch);
        }
        Ok(())
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let len = self.coefficients.len().max(other.coefficients.len());
        let zero = BigUint::zero();
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).unwrap_or(&zero);
                let b = other.coefficients.get(i).unwrap_or(&zero);
                self.field.add(a, b)
            })
            .collect();
        Ok(Self {
            field: self.field.clone(),
            coefficients,
        })
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let len = self.coefficients.len().max(other.coefficients.len());
        let zero = BigUint::zero();
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).unwrap_or(&zero);
                let b = other.coefficients.get(i).unwrap_or(&zero);
                self.field.sub(a, b)
            })
            .collect();
        Ok(Self {
            field: self.field.clone(),
            coefficients,
        })
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let mut coefficients =
            vec![BigUint::zero(); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Ok(Self::from_coefficients(&self.field, coefficients))
    }

    /// `self *= other`
    pub fn mul_assign(&mut self, other: &Self) -> Result<()> {
        let product = self.mul(other)?;
        self.coefficients = product.coefficients;
        Ok(())
    }

    /// `self += other * scalar`, growing `self` to the degree of `other`.
    pub fn add_scaled(&mut self, other: &Self, scalar: &BigUint) -> Result<()> {
        self.check_field(other)?;
        if other.coefficients.len() > self.coefficients.len() {
            self.coefficients
                .resize(other.coefficients.len(), BigUint::zero());
        }
        let scalar = self.field.reduce(scalar);
        for (acc, c) in self.coefficients.iter_mut().zip(&other.coefficients) {
            *acc = (&*acc + c * &scalar) % self.field.modulus();
        }
        Ok(())
    }

    /// Long division returning `(quotient, remainder)`.
    ///
    /// Neither operand is modified. The quotient has degree
    /// `deg(self) - deg(divisor)` (or 0) and the remainder has degree
    /// below `deg(divisor)` (or 0).
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.check_field(divisor)?;
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let field = &self.field;
        let divisor_degree = divisor.effective_degree();
        let dividend_degree = self.effective_degree();

        if dividend_degree < divisor_degree {
            return Ok((Self::zero(field, 0), self.clone()));
        }

        // divisor is nonzero, so its leading coefficient is invertible
        let lead_inv = field
            .inverse(&divisor.coefficients[divisor_degree])
            .ok_or(Error::DivisionByZero)?;

        let mut remainder = self.coefficients[..=dividend_degree].to_vec();
        let mut quotient = vec![BigUint::zero(); dividend_degree - divisor_degree + 1];

        for shift in (0..quotient.len()).rev() {
            let top = &remainder[shift + divisor_degree];
            if top.is_zero() {
                continue;
            }
            let factor = field.mul(top, &lead_inv);
            for (k, d) in divisor.coefficients[..=divisor_degree].iter().enumerate() {
                let term = field.mul(&factor, d);
                remainder[shift + k] = field.sub(&remainder[shift + k], &term);
            }
            quotient[shift] = factor;
        }

        remainder.truncate(divisor_degree.max(1));

        Ok((
            Self {
                field: field.clone(),
                coefficients: quotient,
            },
            Self {
                field: field.clone(),
                coefficients: remainder,
            },
        ))
    }

    /// Horner evaluation at `x`.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let x = self.field.reduce(x);
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| self.field.add(&self.field.mul(&acc, &x), c))
    }

    /// Evaluate at every point in `xs`, preserving order.
    pub fn evaluate_many(&self, xs: &[BigUint]) -> Vec<BigUint> {
        #[cfg(feature = "parallel")]
        {
            xs.par_iter().map(|x| self.evaluate(x)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            xs.iter().map(|x| self.evaluate(x)).collect()
        }
    }
}

impl PartialEq for FieldPolynomial {
    fn eq(&self, other: &Self) -> bool {
        if self.field != other.field {
            return false;
        }
        let a = &self.coefficients[..=self.effective_degree()];
        let b = &other.coefficients[..=other.effective_degree()];
        a == b
    }
}

impl Eq for FieldPolynomial {}

impl fmt::Display for FieldPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}
