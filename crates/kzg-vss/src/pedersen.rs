//! Pedersen-style vector commitment to polynomial coefficients
//!
//! comm[i] = g^{coeff_i}, one group element per coefficient. Unlike KZG the
//! commitment grows with the degree, but it needs no trusted setup and no
//! pairing, so it runs over any [`GroupElement`] backend.
//!
//! An evaluation claim f(x) = y is checked in the exponent:
//!
//! Σ x^i · comm[i] == g^y

use num_bigint::BigUint;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::group::GroupElement;
use crate::poly::FieldPolynomial;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PedersenCommitment<G: GroupElement> {
    elements: Vec<G>,
}

impl<G: GroupElement> PedersenCommitment<G> {
    /// Commit to every stored coefficient of `poly`.
    ///
    /// The polynomial must live in the group's scalar field.
    pub fn commit(poly: &FieldPolynomial) -> Result<Self> {
        if poly.field() != &G::scalar_field() {
            return Err(Error::FieldMismatch);
        }
        let g = G::generator();

        #[cfg(feature = "parallel")]
        let elements = poly
            .coefficients()
            .par_iter()
            .map(|c| g.mul_scalar(c))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let elements = poly.coefficients().iter().map(|c| g.mul_scalar(c)).collect();

        tracing::debug!(len = poly.coefficients().len(), "pedersen commit");
        Ok(Self { elements })
    }

    pub fn from_elements(elements: Vec<G>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[G] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element-wise check against a disclosed polynomial.
    pub fn verify(&self, poly: &FieldPolynomial) -> bool {
        match Self::commit(poly) {
            Ok(recomputed) => recomputed == *self,
            Err(_) => false,
        }
    }

    /// Check that the committed polynomial evaluates to `y` at `x`.
    pub fn verify_eval(&self, x: &BigUint, y: &BigUint) -> bool {
        let field = G::scalar_field();

        let mut powers = Vec::with_capacity(self.elements.len());
        let mut power = field.one();
        for _ in 0..self.elements.len() {
            powers.push(power.clone());
            power = field.mul(&power, x);
        }

        G::multiscalar_mul(&powers, &self.elements) == G::generator().mul_scalar(y)
    }

    /// Commitment to Q + R from commitments to Q and R.
    pub fn additive_homomorphism(&self, other: &Self) -> Result<Self> {
        if self.elements.len() != other.elements.len() {
            return Err(Error::LengthMismatch {
                left: self.elements.len(),
                right: other.elements.len(),
            });
        }
        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a.add(b))
            .collect();
        Ok(Self { elements })
    }

    /// u32 LE count followed by `count` compressed elements
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.elements.len() * G::COMPRESSED_SIZE);
        buf.extend_from_slice(&(self.elements.len() as u32).to_le_bytes());
        for element in &self.elements {
            buf.extend_from_slice(&element.compress());
        }
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::Truncated {
                expected: 4,
                got: bytes.len(),
            });
        }
        let count = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let expected = count
            .checked_mul(G::COMPRESSED_SIZE)
            .and_then(|n| n.checked_add(4))
            .ok_or(Error::Truncated {
                expected: usize::MAX,
                got: bytes.len(),
            })?;
        if bytes.len() != expected {
            return Err(Error::Truncated {
                expected,
                got: bytes.len(),
            });
        }

        let elements = bytes[4..]
            .chunks_exact(G::COMPRESSED_SIZE)
            .map(G::decompress)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn sample<G: GroupElement>(degree: usize, seed: u64) -> FieldPolynomial {
        FieldPolynomial::random(
            &G::scalar_field(),
            degree,
            &mut ChaCha20Rng::seed_from_u64(seed),
        )
    }

    fn check_commit_and_verify<G: GroupElement>() {
        let poly = sample::<G>(5, 1);
        let c = PedersenCommitment::<G>::commit(&poly).unwrap();
        assert_eq!(c.len(), 6);
        assert!(c.verify(&poly));

        let mut other = poly.clone();
        other.set_coefficient(3, &BigUint::from(1u8));
        assert!(!c.verify(&other));
    }

    fn check_verify_eval<G: GroupElement>() {
        let poly = sample::<G>(4, 2);
        let c = PedersenCommitment::<G>::commit(&poly).unwrap();
        let field = G::scalar_field();
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        for x in [BigUint::from(0u8), BigUint::from(1u8), field.random(&mut rng)] {
            let y = poly.evaluate(&x);
            assert!(c.verify_eval(&x, &y));
            assert!(!c.verify_eval(&x, &field.add(&y, &BigUint::from(1u8))));
        }
    }

    fn check_homomorphism<G: GroupElement>() {
        let q = sample::<G>(3, 4);
        let r = sample::<G>(3, 5);
        let cq = PedersenCommitment::<G>::commit(&q).unwrap();
        let cr = PedersenCommitment::<G>::commit(&r).unwrap();
        let sum = q.add(&r).unwrap();

        let combined = cq.additive_homomorphism(&cr).unwrap();
        assert_eq!(combined, PedersenCommitment::<G>::commit(&sum).unwrap());
        assert!(combined.verify(&sum));

        let short = PedersenCommitment::<G>::commit(&sample::<G>(2, 6)).unwrap();
        assert_eq!(
            cq.additive_homomorphism(&short),
            Err(Error::LengthMismatch { left: 4, right: 3 })
        );
    }

    fn check_bytes<G: GroupElement>() {
        let mut poly = sample::<G>(3, 7);
        // zero coefficient commits to the identity
        poly.set_coefficient(1, &BigUint::from(0u8));
        let c = PedersenCommitment::<G>::commit(&poly).unwrap();
        assert!(c.elements()[1].is_identity());

        let bytes = c.to_bytes();
        assert_eq!(bytes.len(), 4 + 4 * G::COMPRESSED_SIZE);
        assert_eq!(&bytes[..4], &[4, 0, 0, 0]);
        assert_eq!(PedersenCommitment::<G>::from_bytes(&bytes).unwrap(), c);

        assert!(matches!(
            PedersenCommitment::<G>::from_bytes(&bytes[..bytes.len() - 1]),
            Err(Error::Truncated { .. })
        ));
        assert!(PedersenCommitment::<G>::from_bytes(&[1, 0]).is_err());
    }

    fn check_field_mismatch<G: GroupElement>() {
        let small = PrimeField::new(BigUint::from(2_147_483_647u64)).unwrap();
        let poly = FieldPolynomial::from_u64s(&small, &[1, 2, 3]);
        assert_eq!(
            PedersenCommitment::<G>::commit(&poly),
            Err(Error::FieldMismatch)
        );
    }

    #[cfg(feature = "bls12-381")]
    mod bls12_381 {
        use super::*;
        use crate::group::bls12_381::G1Point as G;

        #[test]
        fn test_commit_and_verify() {
            check_commit_and_verify::<G>();
        }

        #[test]
        fn test_verify_eval() {
            check_verify_eval::<G>();
        }

        #[test]
        fn test_homomorphism() {
            check_homomorphism::<G>();
        }

        #[test]
        fn test_bytes() {
            check_bytes::<G>();
        }

        #[test]
        fn test_field_mismatch() {
            check_field_mismatch::<G>();
        }
    }

    #[cfg(feature = "p521")]
    mod p521 {
        use super::*;
        use ::p521::ProjectivePoint as G;

        #[test]
        fn test_commit_and_verify() {
            check_commit_and_verify::<G>();
        }

        #[test]
        fn test_verify_eval() {
            check_verify_eval::<G>();
        }

        #[test]
        fn test_homomorphism() {
            check_homomorphism::<G>();
        }

        #[test]
        fn test_bytes() {
            check_bytes::<G>();
        }

        #[test]
        fn test_field_mismatch() {
            check_field_mismatch::<G>();
        }
    }
}
