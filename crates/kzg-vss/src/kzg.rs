//! Kate (KZG) polynomial commitments
//!
//! Setup publishes pk[i] = g1^(s^i) for i in [0, degree] together with g2
//! and g2^s. The secret s is dropped as soon as the powers are computed.
//!
//! - commit:  C = Σ coeff_i · pk[i] = g1^{f(s)}, never computing f(s)
//! - witness: w = Commit(q), q(x) = (f(x) - f(x0)) / (x - x0)
//! - verify:  e(C, g2) == e(w, g2^s · g2^{-x0}) · e(g1, g2)^{y0}
//!
//! Verification uses three pairings and never sees the polynomial.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::group::{GroupElement, PairingEngine};
use crate::poly::FieldPolynomial;

/// Commitment to a polynomial: a single G1 element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KzgCommitment<G: GroupElement>(G);

/// Evaluation proof for a single point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<G: GroupElement>(G);

macro_rules! impl_element_wrapper {
    ($name:ident) => {
        impl<G: GroupElement> $name<G> {
            pub fn new(element: G) -> Self {
                Self(element)
            }

            pub fn element(&self) -> &G {
                &self.0
            }

            pub fn to_bytes(&self) -> Vec<u8> {
                self.0.compress()
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                G::decompress(bytes).map(Self)
            }
        }
    };
}

impl_element_wrapper!(KzgCommitment);
impl_element_wrapper!(Witness);

/// KZG scheme after trusted setup.
///
/// There is no uninitialized state: a `Kzg` only exists once its public
/// parameters have been generated or loaded.
#[derive(Clone, Debug)]
pub struct Kzg<E: PairingEngine> {
    field: PrimeField,
    powers: Vec<E::G1>,
    g2: E::G2,
    g2_secret: E::G2,
    /// e(g1, g2), reused by every verification
    pairing_base: E::Target,
}

impl<E: PairingEngine> Kzg<E> {
    /// Trusted setup for polynomials of degree ≤ `degree`.
    ///
    /// The secret scalar is sampled from `rng` and discarded before
    /// returning.
    pub fn setup<R: RngCore + CryptoRng>(degree: usize, rng: &mut R) -> Self {
        let field = <E::G1 as GroupElement>::scalar_field();
        let mut secret = field.random(rng);
        while secret.is_zero() {
            secret = field.random(rng);
        }
        Self::setup_with_secret(degree, &secret)
    }

    /// Setup from a caller-chosen secret.
    ///
    /// Anyone who knows `secret` can forge witnesses. This exists for
    /// reproducible tests and demos only.
    pub fn setup_with_secret(degree: usize, secret: &BigUint) -> Self {
        let field = <E::G1 as GroupElement>::scalar_field();
        let secret = field.reduce(secret);
        let g1 = E::G1::generator();
        let g2 = E::G2::generator();

        tracing::debug!(degree, "kzg trusted setup");

        let mut powers = Vec::with_capacity(degree + 1);
        let mut power = field.one();
        for _ in 0..=degree {
            powers.push(g1.mul_scalar(&power));
            power = field.mul(&power, &secret);
        }

        let g2_secret = g2.mul_scalar(&secret);
        let pairing_base = E::pairing(&g1, &g2);

        Self {
            field,
            powers,
            g2,
            g2_secret,
            pairing_base,
        }
    }

    /// Rebuild a verifier from published parameters.
    ///
    /// `powers[0]` and `g2` must be the fixed generators.
    pub fn from_parts(powers: Vec<E::G1>, g2: E::G2, g2_secret: E::G2) -> Result<Self> {
        let g1 = E::G1::generator();
        if powers.first() != Some(&g1) {
            return Err(Error::InvalidPoint("first power must be the g1 generator"));
        }
        if g2 != E::G2::generator() {
            return Err(Error::InvalidPoint("g2 must be the g2 generator"));
        }
        let pairing_base = E::pairing(&g1, &g2);
        Ok(Self {
            field: <E::G1 as GroupElement>::scalar_field(),
            powers,
            g2,
            g2_secret,
            pairing_base,
        })
    }

    /// Maximum committable degree
    pub fn degree(&self) -> usize {
        self.powers.len() - 1
    }

    /// Field of polynomial coefficients (the group's scalar field)
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// g1^(s^i) for i in [0, degree]
    pub fn powers(&self) -> &[E::G1] {
        &self.powers
    }

    pub fn g2(&self) -> &E::G2 {
        &self.g2
    }

    pub fn g2_secret(&self) -> &E::G2 {
        &self.g2_secret
    }

    fn check_polynomial(&self, poly: &FieldPolynomial) -> Result<()> {
        if poly.field() != &self.field {
            return Err(Error::FieldMismatch);
        }
        let degree = poly.effective_degree();
        if degree > self.degree() {
            return Err(Error::DegreeOverflow {
                degree,
                max: self.degree(),
            });
        }
        Ok(())
    }

    /// g1^{poly(s)} by multi-scalar multiplication over the powers
    fn eval_in_exponent(&self, poly: &FieldPolynomial) -> E::G1 {
        let len = poly.effective_degree() + 1;
        E::G1::multiscalar_mul(&poly.coefficients()[..len], &self.powers[..len])
    }

    pub fn commit(&self, poly: &FieldPolynomial) -> Result<KzgCommitment<E::G1>> {
        self.check_polynomial(poly)?;
        tracing::debug!(degree = poly.effective_degree(), "kzg commit");
        Ok(KzgCommitment(self.eval_in_exponent(poly)))
    }

    /// Check a fully disclosed polynomial against a commitment.
    pub fn verify_poly(&self, commitment: &KzgCommitment<E::G1>, poly: &FieldPolynomial) -> bool {
        match self.commit(poly) {
            Ok(recomputed) => recomputed == *commitment,
            Err(e) => {
                tracing::debug!(error = %e, "polynomial cannot match commitment");
                false
            }
        }
    }

    /// poly(x) mod p
    pub fn evaluate(&self, poly: &FieldPolynomial, x: &BigUint) -> BigUint {
        poly.evaluate(x)
    }

    /// Witness that `poly(x0)` is the committed evaluation at `x0`.
    pub fn create_witness(&self, poly: &FieldPolynomial, x0: &BigUint) -> Result<Witness<E::G1>> {
        self.check_polynomial(poly)?;

        let y0 = poly.evaluate(x0);
        let mut numerator = poly.clone();
        numerator.set_constant(&self.field.sub(poly.constant(), &y0));

        let (quotient, remainder) =
            numerator.div_rem(&FieldPolynomial::linear(&self.field, x0))?;

        // x0 is a root of the numerator by construction
        if !remainder.is_zero() {
            tracing::error!("witness quotient division was not exact");
            return Err(Error::InexactDivision);
        }

        Ok(Witness(self.eval_in_exponent(&quotient)))
    }

    /// Check that `witness` proves the committed polynomial takes value `y0`
    /// at `x0`. Invalid inputs yield `false`.
    pub fn verify_eval(
        &self,
        commitment: &KzgCommitment<E::G1>,
        x0: &BigUint,
        y0: &BigUint,
        witness: &Witness<E::G1>,
    ) -> bool {
        let lhs = E::pairing(&commitment.0, &self.g2);

        // g2^{s - x0}
        let shifted = self.g2_secret.sub(&self.g2.mul_scalar(x0));
        let rhs = E::target_mul(
            &E::pairing(&witness.0, &shifted),
            &E::target_pow(&self.pairing_base, y0),
        );

        lhs == rhs
    }

    /// Serialize the public parameters.
    ///
    /// Layout: u32 LE count, `count` compressed G1 powers, g2, g2^s.
    pub fn to_bytes(&self) -> Vec<u8> {
        let g1_size = <E::G1 as GroupElement>::COMPRESSED_SIZE;
        let g2_size = <E::G2 as GroupElement>::COMPRESSED_SIZE;
        let mut buf = Vec::with_capacity(4 + self.powers.len() * g1_size + 2 * g2_size);
        buf.extend_from_slice(&(self.powers.len() as u32).to_le_bytes());
        for power in &self.powers {
            buf.extend_from_slice(&power.compress());
        }
        buf.extend_from_slice(&self.g2.compress());
        buf.extend_from_slice(&self.g2_secret.compress());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let g1_size = <E::G1 as GroupElement>::COMPRESSED_SIZE;
        let g2_size = <E::G2 as GroupElement>::COMPRESSED_SIZE;

        if bytes.len() < 4 {
            return Err(Error::Truncated {
                expected: 4,
                got: bytes.len(),
            });
        }
        let count = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        if count == 0 {
            return Err(Error::InvalidDegree("parameters hold no powers".into()));
        }

        let expected = count
            .checked_mul(g1_size)
            .and_then(|n| n.checked_add(4 + 2 * g2_size))
            .ok_or(Error::InvalidDegree("power count overflows".into()))?;
        if bytes.len() != expected {
            return Err(Error::Truncated {
                expected,
                got: bytes.len(),
            });
        }

        let (g1_bytes, g2_bytes) = bytes[4..].split_at(count * g1_size);
        let powers = g1_bytes
            .chunks_exact(g1_size)
            .map(E::G1::decompress)
            .collect::<Result<Vec<_>>>()?;
        let g2 = E::G2::decompress(&g2_bytes[..g2_size])?;
        let g2_secret = E::G2::decompress(&g2_bytes[g2_size..])?;

        Self::from_parts(powers, g2, g2_secret)
    }
}
