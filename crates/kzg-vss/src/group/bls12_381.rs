//! BLS12-381 backend (arkworks)
//!
//! [`G1Point`] and [`G2Point`] wrap the projective groups of ark-bls12-381;
//! the target group is `PairingOutput<Bls12_381>`. Compressed points use the
//! arkworks (zcash) encoding of 48 bytes for G1 and 96 bytes for G2, except
//! that the point at infinity is written as `0xFF` followed by zeros.
//!
//! The wrappers are needed because arkworks spells both groups as
//! `Projective<_>` over associated-type projections, which coherence cannot
//! tell apart.

use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{CurveGroup, Group, VariableBaseMSM};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use num_bigint::BigUint;

use super::{GroupElement, PairingEngine, INFINITY_HEADER};
use crate::error::{Error, Result};

/// Element of BLS12-381 G1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G1Point(pub G1Projective);

/// Element of BLS12-381 G2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct G2Point(pub G2Projective);

fn to_fr(scalar: &BigUint) -> Fr {
    Fr::from_le_bytes_mod_order(&scalar.to_bytes_le())
}

fn compress_affine<A: CanonicalSerialize>(point: &A, is_identity: bool, size: usize) -> Vec<u8> {
    if is_identity {
        let mut out = vec![0u8; size];
        out[0] = INFINITY_HEADER;
        return out;
    }
    let mut out = Vec::with_capacity(size);
    // writing into a Vec cannot fail
    if point.serialize_compressed(&mut out).is_err() {
        out.clear();
    }
    out
}

fn check_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::Truncated {
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

macro_rules! impl_bls_group {
    ($point:ident, $projective:ty, $affine:ty, $size:expr, $invalid:expr) => {
        impl From<$projective> for $point {
            fn from(p: $projective) -> Self {
                Self(p)
            }
        }

        impl GroupElement for $point {
            const COMPRESSED_SIZE: usize = $size;

            fn identity() -> Self {
                Self(<$projective>::zero())
            }

            fn generator() -> Self {
                Self(<$projective as Group>::generator())
            }

            fn scalar_modulus() -> BigUint {
                Fr::MODULUS.into()
            }

            fn add(&self, other: &Self) -> Self {
                Self(self.0 + other.0)
            }

            fn neg(&self) -> Self {
                Self(-self.0)
            }

            fn mul_scalar(&self, scalar: &BigUint) -> Self {
                Self(self.0 * to_fr(scalar))
            }

            fn is_identity(&self) -> bool {
                self.0.is_zero()
            }

            fn multiscalar_mul(scalars: &[BigUint], points: &[Self]) -> Self {
                let len = scalars.len().min(points.len());
                let projective: Vec<$projective> = points[..len].iter().map(|p| p.0).collect();
                let bases = <$projective>::normalize_batch(&projective);
                let scalars: Vec<Fr> = scalars[..len].iter().map(to_fr).collect();
                Self(<$projective>::msm_unchecked(&bases, &scalars))
            }

            fn compress(&self) -> Vec<u8> {
                compress_affine(&self.0.into_affine(), self.0.is_zero(), Self::COMPRESSED_SIZE)
            }

            fn decompress(bytes: &[u8]) -> Result<Self> {
                check_len(bytes, Self::COMPRESSED_SIZE)?;
                if bytes[0] == INFINITY_HEADER {
                    return Ok(Self::identity());
                }
                <$affine>::deserialize_compressed(bytes)
                    .map(|a| Self(a.into()))
                    .map_err(|_| Error::InvalidPoint($invalid))
            }
        }
    };
}

impl_bls_group!(G1Point, G1Projective, G1Affine, 48, "not a bls12-381 g1 point");
impl_bls_group!(G2Point, G2Projective, G2Affine, 96, "not a bls12-381 g2 point");

/// BLS12-381 pairing backend
#[derive(Clone, Debug, Default)]
pub struct Bls12381;

impl PairingEngine for Bls12381 {
    type G1 = G1Point;
    type G2 = G2Point;
    type Target = PairingOutput<Bls12_381>;

    fn pairing(p: &Self::G1, q: &Self::G2) -> Self::Target {
        Bls12_381::pairing(p.0.into_affine(), q.0.into_affine())
    }

    fn target_mul(a: &Self::Target, b: &Self::Target) -> Self::Target {
        // arkworks writes GT additively
        *a + *b
    }

    fn target_pow(a: &Self::Target, exponent: &BigUint) -> Self::Target {
        *a * to_fr(exponent)
    }
}
