//! Verifiable secret sharing over KZG commitments
//!
//! The dealer owns a secret polynomial f of degree t and publishes a single
//! commitment C = Commit(f). Participant i receives (i, f(i), w_i) where w_i
//! proves f(i) against C. Any t+1 valid shares reconstruct f and with it the
//! secret f(0).
//!
//! Indices start at 1: the share at x = 0 would be the secret itself.

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::group::{GroupElement, PairingEngine};
use crate::kzg::{Kzg, KzgCommitment, Witness};
use crate::lagrange;
use crate::poly::FieldPolynomial;

/// One participant's evaluation of the secret polynomial
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share<G: GroupElement> {
    /// evaluation point, 1-indexed
    pub index: u32,
    /// f(index) mod p
    pub value: BigUint,
    pub witness: Option<Witness<G>>,
}

impl<G: GroupElement> Share<G> {
    pub fn new(index: u32, value: BigUint, witness: Option<Witness<G>>) -> Self {
        Self {
            index,
            value,
            witness,
        }
    }

    /// Evaluation point as a field element
    pub fn x(&self) -> BigUint {
        BigUint::from(self.index)
    }

    /// (x, y) pair for interpolation
    pub fn point(&self) -> (BigUint, BigUint) {
        (self.x(), self.value.clone())
    }

    /// Encode as: u32 LE index, u32 LE value length, big-endian value,
    /// witness flag byte, compressed witness when the flag is 1.
    pub fn to_bytes(&self) -> Vec<u8> {
        let value = self.value.to_bytes_be();
        let mut buf = Vec::with_capacity(9 + value.len() + G::COMPRESSED_SIZE);
        buf.extend_from_slice(&self.index.to_le_bytes());
        buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
        buf.extend_from_slice(&value);
        match &self.witness {
            Some(w) => {
                buf.push(1);
                buf.extend_from_slice(&w.to_bytes());
            }
            None => buf.push(0),
        }
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let truncated = |expected: usize| Error::Truncated {
            expected,
            got: bytes.len(),
        };

        if bytes.len() < 8 {
            return Err(truncated(8));
        }
        let index = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let value_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;

        let flag_at = 8usize
            .checked_add(value_len)
            .ok_or_else(|| truncated(usize::MAX))?;
        if bytes.len() <= flag_at {
            return Err(truncated(flag_at + 1));
        }
        let value = BigUint::from_bytes_be(&bytes[8..flag_at]);

        let rest = &bytes[flag_at + 1..];
        let witness = match bytes[flag_at] {
            0 if rest.is_empty() => None,
            0 => return Err(truncated(flag_at + 1)),
            1 => {
                if rest.len() != G::COMPRESSED_SIZE {
                    return Err(truncated(flag_at + 1 + G::COMPRESSED_SIZE));
                }
                Some(Witness::from_bytes(rest)?)
            }
            _ => return Err(Error::InvalidPoint("unknown witness flag")),
        };

        Ok(Self {
            index,
            value,
            witness,
        })
    }
}

/// Owner of the secret polynomial.
///
/// The polynomial never leaves the dealer; only the commitment and shares
/// are handed out.
pub struct Dealer<'a, E: PairingEngine> {
    kzg: &'a Kzg<E>,
    poly: FieldPolynomial,
    commitment: KzgCommitment<E::G1>,
}

impl<'a, E: PairingEngine> Dealer<'a, E> {
    /// Take ownership of `poly` and commit to it.
    pub fn new(kzg: &'a Kzg<E>, poly: FieldPolynomial) -> Result<Self> {
        let commitment = kzg.commit(&poly)?;
        Ok(Self {
            kzg,
            poly,
            commitment,
        })
    }

    /// Sample a fresh secret polynomial of the given threshold degree.
    pub fn random<R: RngCore + CryptoRng>(kzg: &'a Kzg<E>, degree: usize, rng: &mut R) -> Result<Self> {
        if degree > kzg.degree() {
            return Err(Error::DegreeOverflow {
                degree,
                max: kzg.degree(),
            });
        }
        Self::new(kzg, FieldPolynomial::random(kzg.field(), degree, rng))
    }

    pub fn commitment(&self) -> &KzgCommitment<E::G1> {
        &self.commitment
    }

    /// Threshold degree: `degree + 1` shares reconstruct the secret.
    /// Trailing zero coefficients do not count.
    pub fn degree(&self) -> usize {
        self.poly.effective_degree()
    }

    /// f(0)
    pub fn secret(&self) -> &BigUint {
        self.poly.constant()
    }

    pub fn share(&self, index: u32) -> Result<Share<E::G1>> {
        if index == 0 {
            return Err(Error::ZeroShareIndex);
        }
        let x = BigUint::from(index);
        let witness = self.kzg.create_witness(&self.poly, &x)?;
        Ok(Share {
            index,
            value: self.poly.evaluate(&x),
            witness: Some(witness),
        })
    }

    /// Shares for participants 1..=n, each with a witness.
    pub fn deal(&self, n: u32) -> Result<Vec<Share<E::G1>>> {
        let need = self.degree() + 1;
        if (n as usize) < need {
            return Err(Error::InsufficientPoints {
                got: n as usize,
                need,
            });
        }
        tracing::debug!(n, degree = self.degree(), "dealing shares");

        #[cfg(feature = "parallel")]
        {
            (1..=n).into_par_iter().map(|i| self.share(i)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (1..=n).map(|i| self.share(i)).collect()
        }
    }
}

/// Check a share against the dealer's commitment. Shares without a witness
/// are rejected.
pub fn verify_share<E: PairingEngine>(
    kzg: &Kzg<E>,
    commitment: &KzgCommitment<E::G1>,
    share: &Share<E::G1>,
) -> bool {
    match &share.witness {
        Some(w) if share.index != 0 => kzg.verify_eval(commitment, &share.x(), &share.value, w),
        _ => false,
    }
}

/// Verify a batch of shares, returning one flag per share in input order.
pub fn verify_shares<E: PairingEngine>(
    kzg: &Kzg<E>,
    commitment: &KzgCommitment<E::G1>,
    shares: &[Share<E::G1>],
) -> Vec<bool> {
    let check = |share: &Share<E::G1>| {
        let ok = verify_share(kzg, commitment, share);
        if !ok {
            tracing::warn!(index = share.index, "rejected share");
        }
        ok
    };

    #[cfg(feature = "parallel")]
    {
        shares.par_iter().map(check).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        shares.iter().map(check).collect()
    }
}

/// Rebuild the polynomial of the given threshold degree from the first
/// `degree + 1` shares.
///
/// Shares are not verified here; filter them with [`verify_shares`] first.
pub fn reconstruct<G: GroupElement>(
    field: &PrimeField,
    degree: usize,
    shares: &[Share<G>],
) -> Result<FieldPolynomial> {
    let points: Vec<_> = shares.iter().map(Share::point).collect();
    lagrange::interpolate(field, degree, &points)
}

/// f(0) of the reconstructed polynomial
pub fn recover_secret<G: GroupElement>(
    field: &PrimeField,
    degree: usize,
    shares: &[Share<G>],
) -> Result<BigUint> {
    reconstruct(field, degree, shares).map(|poly| poly.constant().clone())
}

#[cfg(all(test, feature = "bls12-381"))]
mod tests {
    use super::*;
    use crate::group::bls12_381::Bls12381;
    use crate::group::bls12_381::G1Point;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn scheme() -> Kzg<Bls12381> {
        Kzg::setup_with_secret(6, &BigUint::from(0x5eed_cafe_u64))
    }

    #[test]
    fn test_deal_verify_reconstruct() {
        let kzg = scheme();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let dealer = Dealer::random(&kzg, 3, &mut rng).unwrap();

        let shares = dealer.deal(7).unwrap();
        assert_eq!(shares.len(), 7);
        assert_eq!(shares[0].index, 1);
        assert!(shares.iter().all(|s| verify_share(&kzg, dealer.commitment(), s)));

        let poly = reconstruct(kzg.field(), 3, &shares[2..6]).unwrap();
        assert!(kzg.verify_poly(dealer.commitment(), &poly));
        assert_eq!(
            recover_secret(kzg.field(), 3, &shares[3..]).unwrap(),
            *dealer.secret()
        );
    }

    #[test]
    fn test_too_few_shares() {
        let kzg = scheme();
        let dealer = Dealer::random(&kzg, 3, &mut ChaCha20Rng::seed_from_u64(2)).unwrap();
        let shares = dealer.deal(5).unwrap();
        assert_eq!(
            recover_secret(kzg.field(), 3, &shares[..3]),
            Err(Error::InsufficientPoints { got: 3, need: 4 })
        );
        assert!(matches!(
            dealer.deal(3),
            Err(Error::InsufficientPoints { got: 3, need: 4 })
        ));
    }

    #[test]
    fn test_trailing_zeros_do_not_raise_threshold() {
        let kzg = scheme();
        let poly = FieldPolynomial::from_u64s(kzg.field(), &[11, 4, 0, 0, 0]);
        let dealer = Dealer::new(&kzg, poly).unwrap();
        assert_eq!(dealer.degree(), 1);

        let shares = dealer.deal(2).unwrap();
        assert!(verify_shares(&kzg, dealer.commitment(), &shares).iter().all(|&ok| ok));
        assert_eq!(
            recover_secret(kzg.field(), dealer.degree(), &shares).unwrap(),
            BigUint::from(11u8)
        );
    }

    #[test]
    fn test_dealer_degree_overflow() {
        let kzg = scheme();
        let result = Dealer::random(&kzg, 7, &mut ChaCha20Rng::seed_from_u64(3));
        assert!(matches!(
            result,
            Err(Error::DegreeOverflow { degree: 7, max: 6 })
        ));
    }

    #[test]
    fn test_zero_index_rejected() {
        let kzg = scheme();
        let dealer = Dealer::random(&kzg, 2, &mut ChaCha20Rng::seed_from_u64(4)).unwrap();
        assert!(matches!(dealer.share(0), Err(Error::ZeroShareIndex)));

        // a forged share at 0 never verifies, even with a valid witness
        let mut forged = dealer.share(1).unwrap();
        forged.index = 0;
        assert!(!verify_share(&kzg, dealer.commitment(), &forged));
    }

    #[test]
    fn test_batch_flags_tampered_shares() {
        let kzg = scheme();
        let dealer = Dealer::random(&kzg, 2, &mut ChaCha20Rng::seed_from_u64(5)).unwrap();
        let mut shares = dealer.deal(6).unwrap();

        shares[1].value = kzg.field().add(&shares[1].value, &BigUint::from(1u8));
        shares[4].witness = None;
        let swapped = shares[2].witness.clone();
        shares[3].witness = swapped;

        let flags = verify_shares(&kzg, dealer.commitment(), &shares);
        assert_eq!(flags, vec![true, false, true, false, false, true]);
    }

    #[test]
    fn test_share_bytes() {
        let kzg = scheme();
        let dealer = Dealer::random(&kzg, 2, &mut ChaCha20Rng::seed_from_u64(6)).unwrap();
        let share = dealer.share(3).unwrap();

        let bytes = share.to_bytes();
        assert_eq!(&bytes[..4], &[3, 0, 0, 0]);
        assert_eq!(Share::<G1Point>::from_bytes(&bytes).unwrap(), share);

        let bare = Share::<G1Point>::new(9, BigUint::from(0u8), None);
        let bytes = bare.to_bytes();
        assert_eq!(bytes, vec![9, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(Share::<G1Point>::from_bytes(&bytes).unwrap(), bare);
    }

    #[test]
    fn test_share_bytes_rejects_malformed() {
        let kzg = scheme();
        let dealer = Dealer::random(&kzg, 2, &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
        let bytes = dealer.share(1).unwrap().to_bytes();

        assert!(matches!(
            Share::<G1Point>::from_bytes(&bytes[..5]),
            Err(Error::Truncated { expected: 8, got: 5 })
        ));
        assert!(matches!(
            Share::<G1Point>::from_bytes(&bytes[..bytes.len() - 1]),
            Err(Error::Truncated { .. })
        ));

        let mut bad_flag = bytes.clone();
        let flag_at = bytes.len() - 1 - 48;
        bad_flag[flag_at] = 7;
        assert!(matches!(
            Share::<G1Point>::from_bytes(&bad_flag),
            Err(Error::InvalidPoint(_))
        ));

        let mut trailing = Share::<G1Point>::new(1, BigUint::from(5u8), None).to_bytes();
        trailing.push(0);
        assert!(Share::<G1Point>::from_bytes(&trailing).is_err());
    }
}
