//! Verification of KZG proofs for blobs over BLS12-381.
//!
//! [verify] checks a single opening `p(z) = y` against a commitment.
//! [aggregate] checks one proof covering many blobs, recomputing the
//! Fiat-Shamir challenges and the folded evaluation itself.
//!
//! Every function returns `Ok(false)` for a well-formed proof that does not
//! verify and `Err` for malformed input, so callers can tell a rejected proof
//! from a broken request.

pub mod aggregate;
pub mod verify;
