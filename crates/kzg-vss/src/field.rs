//! Prime field parameters
//!
//! A [`PrimeField`] is the immutable parameter object every polynomial and
//! commitment carries. It is constructed once (from the group's scalar order
//! or from a decimal modulus) and shared by cheap clones.
//!
//! The modulus is assumed to be prime. It is not tested for primality:
//! inversion uses Fermat's little theorem and is only correct for a prime.

use std::sync::Arc;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::RngCore;

use crate::error::{Error, Result};

/// Plain ASCII digits only: no sign, no `_` separators, no radix prefix.
pub(crate) fn parse_decimal(text: &str) -> Option<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
}

/// Integers modulo a fixed prime p.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus < BigUint::from(2u8) {
            return Err(Error::InvalidModulus(format!(
                "modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(Self {
            modulus: Arc::new(modulus),
        })
    }

    /// Field of a backend's scalars; group orders are large primes so the
    /// range check in [`PrimeField::new`] is skipped.
    pub(crate) fn from_group_order(order: BigUint) -> Self {
        Self {
            modulus: Arc::new(order),
        }
    }

    /// Parse a decimal modulus such as `"2147483647"`.
    pub fn from_decimal(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let modulus = parse_decimal(trimmed)
            .ok_or_else(|| Error::InvalidModulus(format!("not a decimal integer: {:?}", trimmed)))?;
        Self::new(modulus)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bytes needed to hold any element in big-endian form
    pub fn byte_len(&self) -> usize {
        ((self.modulus.bits() + 7) / 8) as usize
    }

    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % self.modulus.as_ref()
    }

    pub fn from_u64(&self, value: u64) -> BigUint {
        self.reduce(&BigUint::from(value))
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        value < self.modulus.as_ref()
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.modulus.as_ref()
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let m = self.modulus.as_ref();
        let a = a % m;
        let b = b % m;
        if a >= b {
            a - b
        } else {
            m - b + a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.modulus.as_ref()
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);
        if a.is_zero() {
            a
        } else {
            self.modulus.as_ref() - a
        }
    }

    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inverse(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return None;
        }
        let exponent = self.modulus.as_ref() - BigUint::from(2u8);
        Some(a.modpow(&exponent, &self.modulus))
    }

    /// Uniform element of [0, p).
    ///
    /// Reproducible when `rng` is seeded; callers outside tests must pass a
    /// cryptographically secure generator such as `OsRng`.
    pub fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&self.modulus)
    }

    pub fn one(&self) -> BigUint {
        BigUint::one() % self.modulus.as_ref()
    }
}
