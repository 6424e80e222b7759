//! NIST P-521 backend (RustCrypto)
//!
//! Compressed encoding: one header byte followed by the 66-byte big-endian
//! x-coordinate. The header is `2 | (y & 1)` for affine points and `0xFF`
//! for the point at infinity. On decode y is recovered from
//! y² = x³ - 3x + b (mod P) and negated when its parity disagrees with the
//! header; an x without a square root is rejected.

use num_bigint::BigUint;
use p521::elliptic_curve::group::Group;
use p521::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p521::elliptic_curve::PrimeField;
use p521::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

use super::{GroupElement, INFINITY_HEADER};
use crate::error::{Error, Result};

/// Field element size of P-521 in bytes
const COORDINATE_SIZE: usize = 66;

/// Order n of the P-521 base point, big-endian
const ORDER_BE: [u8; COORDINATE_SIZE] = [
    0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfa, 0x51, 0x86, 0x87, 0x83, 0xbf, 0x2f, 0x96, 0x6b, 0x7f, 0xcc,
    0x01, 0x48, 0xf7, 0x09, 0xa5, 0xd0, 0x3b, 0xb5, 0xc9, 0xb8, 0x89,
    0x9c, 0x47, 0xae, 0xbb, 0x6f, 0xb7, 0x1e, 0x91, 0x38, 0x64, 0x09,
];

fn order() -> BigUint {
    BigUint::from_bytes_be(&ORDER_BE)
}

fn to_scalar(value: &BigUint) -> Scalar {
    let reduced = (value % order()).to_bytes_be();
    let mut repr = FieldBytes::default();
    repr[COORDINATE_SIZE - reduced.len()..].copy_from_slice(&reduced);
    // reduced below n, so the representation is canonical
    Option::<Scalar>::from(Scalar::from_repr(repr)).unwrap_or(Scalar::ZERO)
}

impl GroupElement for ProjectivePoint {
    const COMPRESSED_SIZE: usize = 1 + COORDINATE_SIZE;

    fn identity() -> Self {
        ProjectivePoint::IDENTITY
    }

    fn generator() -> Self {
        ProjectivePoint::GENERATOR
    }

    fn scalar_modulus() -> BigUint {
        order()
    }

    fn add(&self, other: &Self) -> Self {
        *self + *other
    }

    fn neg(&self) -> Self {
        -*self
    }

    fn mul_scalar(&self, scalar: &BigUint) -> Self {
        *self * to_scalar(scalar)
    }

    fn is_identity(&self) -> bool {
        bool::from(Group::is_identity(self))
    }

    fn compress(&self) -> Vec<u8> {
        if GroupElement::is_identity(self) {
            let mut out = vec![0u8; Self::COMPRESSED_SIZE];
            out[0] = INFINITY_HEADER;
            return out;
        }
        // sec1 compressed form is exactly 2|parity followed by big-endian x
        self.to_affine().to_encoded_point(true).as_bytes().to_vec()
    }

    fn decompress(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::COMPRESSED_SIZE {
            return Err(Error::Truncated {
                expected: Self::COMPRESSED_SIZE,
                got: bytes.len(),
            });
        }
        match bytes[0] {
            INFINITY_HEADER => Ok(ProjectivePoint::IDENTITY),
            0x02 | 0x03 => {
                let encoded = EncodedPoint::from_bytes(bytes)
                    .map_err(|_| Error::InvalidPoint("malformed p-521 encoding"))?;
                Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
                    .map(ProjectivePoint::from)
                    .ok_or(Error::InvalidPoint("x has no square root on p-521"))
            }
            _ => Err(Error::InvalidPoint("unknown p-521 header byte")),
        }
    }
}
