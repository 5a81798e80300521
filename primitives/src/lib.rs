//! ## Library Design / Architecture
//!
//! Types and functions shared by the blob KZG prover and verifier crates.
//!
//! ### Data Types
//!
//! The main data pipeline goes:
//! > blob bytes -> [blob::Blob] -> [polynomial::PolynomialEvalForm] ->
//! > KZG Commitment / Proof
//!
//! - Blob: exactly [consts::FIELD_ELEMENTS_PER_BLOB] BLS12-381 scalar field
//!   elements, each 32 big-endian bytes strictly below the field modulus.
//!   Nothing is padded or reduced: non-canonical bytes are rejected.
//! - Polynomial: the blob elements interpreted as evaluations over the roots
//!   of unity of order 4096, in natural order. An IFFT gives the coefficient
//!   form ([polynomial::PolynomialCoeffForm]).
//! - Trusted setup: [setup::TrustedSetup] holds `[τ^i]₁` in monomial and in
//!   Lagrange form, `[τ^i]₂` and the roots of unity.
//!
//! ### KZG Commitments
//!
//! A KZG commitment is an inner product between (poly_coeff, g1_monomial) or
//! (poly_eval, g1_lagrange). Both give the same point, `[p(τ)]₁`.
//!
//! ### KZG Proofs
//!
//! A proof that `p(z) = y` is a commitment to the quotient
//! `q(X) = (p(X) - y) / (X - z)`. The verifier checks
//! `e(proof, [τ - z]₂) = e(C - [y]₁, [1]₂)`.
//!
//! Aggregate proofs fold many blobs into one polynomial with powers of a
//! Fiat-Shamir challenge `r` and open it at a second challenge `x`, see
//! [helpers::compute_challenges].
//!
//! ### Encodings
//!
//! Commitments and proofs are compressed G1 points (48 bytes), field elements
//! are 32 big-endian bytes, and G2 points in the setup are compressed (96
//! bytes). All decoding validates the subgroup and the canonical encoding.

pub mod blob;
pub mod consts;
pub mod errors;
pub mod helpers;
pub mod polynomial;
pub mod setup;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
pub mod traits;
