//! error types for kzg-vss

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by field, polynomial, commitment and sharing operations.
///
/// Verification outcomes are never errors: a forged witness or a tampered
/// share is reported as `false` by the `verify*` functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // === construction errors ===
    #[error("invalid degree: {0}")]
    InvalidDegree(String),

    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("malformed polynomial: {0}")]
    MalformedPolynomial(String),

    #[error("coefficient index {index} exceeds degree {degree}")]
    IndexOutOfRange { index: usize, degree: usize },

    // === arithmetic errors ===
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// Carries the x-coordinates that were consumed by the interpolation
    #[error("duplicate x-coordinate among {xs:?}")]
    DuplicatePoint { xs: Vec<num_bigint::BigUint> },

    #[error("division left a nonzero remainder where an exact quotient was required")]
    InexactDivision,

    #[error("insufficient points: got {got}, need {need}")]
    InsufficientPoints { got: usize, need: usize },

    #[error("share index 0 would disclose the secret")]
    ZeroShareIndex,

    // === dimension errors ===
    #[error("polynomial degree {degree} exceeds supported degree {max}")]
    DegreeOverflow { degree: usize, max: usize },

    #[error("commitment length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("operands belong to different prime fields")]
    FieldMismatch,

    // === decode errors ===
    #[error("invalid group element encoding: {0}")]
    InvalidPoint(&'static str),

    #[error("truncated input: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
}
