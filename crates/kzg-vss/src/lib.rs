//! Verifiable Secret Sharing with Kate (KZG) Polynomial Commitments
//!
//! A dealer hides a secret as the constant term of a random polynomial over
//! a large prime field, publishes one constant-size commitment to it, and
//! hands each participant an evaluation together with a witness. Anyone can
//! check a share against the commitment with three pairings, and any
//! `degree + 1` valid shares rebuild the polynomial by Lagrange
//! interpolation.
//!
//! # Components
//!
//! - [`FieldPolynomial`]: dense polynomials over a [`PrimeField`]
//! - [`interpolate`]: O(d²) Lagrange reconstruction
//! - [`Kzg`]: trusted setup, commitments, evaluation witnesses
//! - [`PedersenCommitment`]: per-coefficient commitments over any group
//! - [`Dealer`], [`Share`], [`verify_shares`], [`recover_secret`]: the
//!   sharing flow
//!
//! # Group Backends
//!
//! - `bls12-381` (default): pairing-friendly, KZG and Pedersen
//! - `p521` (default): NIST P-521, Pedersen only
//!
//! # Example
//!
//! ```ignore
//! use kzg_vss::{Bls12381, Dealer, Kzg, recover_secret, verify_shares};
//! use rand::rngs::OsRng;
//!
//! let kzg: Kzg<Bls12381> = Kzg::setup(degree, &mut OsRng);
//! let dealer = Dealer::random(&kzg, degree, &mut OsRng)?;
//! let shares = dealer.deal(n)?;
//!
//! // each participant, or a collector for the whole batch
//! let valid = verify_shares(&kzg, dealer.commitment(), &shares);
//!
//! let secret = recover_secret(kzg.field(), degree, &shares[..degree + 1])?;
//! ```

mod error;
mod field;
pub mod group;
pub mod kzg;
mod lagrange;
mod params;
pub mod pedersen;
mod poly;
pub mod sharing;

pub use error::{Error, Result};
pub use field::PrimeField;
pub use group::{GroupElement, PairingEngine, INFINITY_HEADER};
pub use kzg::{Kzg, KzgCommitment, Witness};
pub use lagrange::interpolate;
pub use params::SharingParams;
pub use pedersen::PedersenCommitment;
pub use poly::FieldPolynomial;
pub use sharing::{reconstruct, recover_secret, verify_share, verify_shares, Dealer, Share};

#[cfg(feature = "bls12-381")]
pub use group::bls12_381::{Bls12381, G1Point, G2Point};

#[cfg(feature = "p521")]
pub use p521::ProjectivePoint as P521Point;
