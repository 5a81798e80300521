//! Commitments and proofs for blobs over BLS12-381.
//!
//! The [kzg::KZG] engine works on typed values from `blob_kzg_primitives`;
//! the free functions in [kzg] take and return the serialized forms (blob
//! bytes, 32-byte field elements, 48-byte compressed points).
//!
//! ```no_run
//! use blob_kzg_primitives::{consts::BYTES_PER_BLOB, setup::TrustedSetup};
//! use blob_kzg_prover::kzg;
//!
//! let setup = TrustedSetup::load("trusted_setup.txt").unwrap();
//! let blob = vec![0u8; BYTES_PER_BLOB];
//! let commitment = kzg::blob_to_kzg_commitment(&blob, &setup).unwrap();
//! let (proof, y) = kzg::compute_kzg_proof(&blob, &[0u8; 32], &setup).unwrap();
//! ```

pub mod kzg;
