//! Group abstraction for commitments
//!
//! Defines traits for the cyclic groups the commitment schemes run over,
//! allowing the same algorithms to work with different backends:
//! - BLS12-381 (pairing-friendly, used by KZG and Pedersen)
//! - NIST P-521 (plain elliptic-curve group, Pedersen only)
//!
//! Scalars are passed as `BigUint` and reduced modulo the group order by the
//! backend, so a [`FieldPolynomial`](crate::FieldPolynomial) over the
//! group's scalar field can be committed without conversion.
//!
//! Compressed encodings reserve a leading `0xFF` byte for the point at
//! infinity.

use core::fmt::Debug;

use num_bigint::BigUint;

use crate::error::Result;
use crate::field::PrimeField;

#[cfg(feature = "bls12-381")]
pub mod bls12_381;

#[cfg(feature = "p521")]
pub mod p521;

/// Header byte marking the point at infinity in compressed encodings
pub const INFINITY_HEADER: u8 = 0xFF;

/// Element of a prime-order cyclic group written additively.
pub trait GroupElement: Clone + Debug + PartialEq + Eq + Send + Sync + Sized {
    /// Compressed encoding size in bytes
    const COMPRESSED_SIZE: usize;

    /// The identity element
    fn identity() -> Self;

    /// The fixed generator
    fn generator() -> Self;

    /// Order of the group, i.e. the modulus of its scalar field
    fn scalar_modulus() -> BigUint;

    /// Group operation
    fn add(&self, other: &Self) -> Self;

    /// Inverse element
    fn neg(&self) -> Self;

    /// Scalar multiplication, reducing `scalar` modulo the group order
    fn mul_scalar(&self, scalar: &BigUint) -> Self;

    fn is_identity(&self) -> bool;

    /// Compress to `COMPRESSED_SIZE` bytes
    fn compress(&self) -> Vec<u8>;

    /// Decompress, rejecting encodings that are not group elements
    fn decompress(bytes: &[u8]) -> Result<Self>;

    /// Σ scalars[i] · points[i]
    fn multiscalar_mul(scalars: &[BigUint], points: &[Self]) -> Self {
        scalars
            .iter()
            .zip(points.iter())
            .fold(Self::identity(), |acc, (s, p)| acc.add(&p.mul_scalar(s)))
    }

    /// Group difference `self - other`
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// The prime field of scalars acting on this group
    fn scalar_field() -> PrimeField {
        PrimeField::from_group_order(Self::scalar_modulus())
    }
}

/// Bilinear pairing e: G1 × G2 → GT between groups of the same prime order.
///
/// The target group is written multiplicatively to match the verification
/// equations.
pub trait PairingEngine: Clone + Debug + Default + Send + Sync {
    type G1: GroupElement;
    type G2: GroupElement;
    type Target: Clone + Debug + PartialEq + Send + Sync;

    fn pairing(p: &Self::G1, q: &Self::G2) -> Self::Target;

    /// Group operation in GT
    fn target_mul(a: &Self::Target, b: &Self::Target) -> Self::Target;

    /// Exponentiation in GT, reducing `exponent` modulo the group order
    fn target_pow(a: &Self::Target, exponent: &BigUint) -> Self::Target;
}
