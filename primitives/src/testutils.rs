//! Insecure trusted setups and random inputs for tests and benches.
//!
//! The setups here are derived from a publicly known τ, so anyone can forge
//! proofs against them. Never use them outside of tests.

use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{rand::RngCore, UniformRand};
use rayon::prelude::*;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        OnceLock,
    },
};

use crate::{
    blob::Blob,
    consts::{FIELD_ELEMENTS_PER_BLOB, NUM_G2_POINTS},
    helpers,
    setup::TrustedSetup,
};

/// The τ behind [insecure_trusted_setup].
pub const INSECURE_SECRET: u64 = 1337;

/// `([τ^i]₁ for i < FIELD_ELEMENTS_PER_BLOB, [τ^i]₂ for i < NUM_G2_POINTS)`.
pub fn insecure_setup_points(secret: &Fr) -> (Vec<G1Affine>, Vec<G2Affine>) {
    let powers = helpers::compute_powers(secret, FIELD_ELEMENTS_PER_BLOB);

    let g1_generator = G1Affine::generator();
    let g1: Vec<G1Projective> = powers.par_iter().map(|p| g1_generator * p).collect();

    let g2_generator = G2Affine::generator();
    let g2: Vec<G2Projective> = powers[..NUM_G2_POINTS]
        .par_iter()
        .map(|p| g2_generator * p)
        .collect();

    (
        G1Projective::normalize_batch(&g1),
        G2Projective::normalize_batch(&g2),
    )
}

/// Builds a setup for an arbitrary τ.
pub fn insecure_trusted_setup_from_secret(secret: &Fr) -> TrustedSetup {
    let (g1, g2) = insecure_setup_points(secret);
    TrustedSetup::new(g1, g2).expect("points derived from a secret form a valid setup")
}

/// A process-wide setup for τ = [INSECURE_SECRET], built on first use.
pub fn insecure_trusted_setup() -> &'static TrustedSetup {
    static SETUP: OnceLock<TrustedSetup> = OnceLock::new();
    SETUP.get_or_init(|| insecure_trusted_setup_from_secret(&Fr::from(INSECURE_SECRET)))
}

/// Writes `setup` to a fresh file in the temp dir and returns its path.
pub fn write_trusted_setup_file(setup: &TrustedSetup, name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "blob-kzg-{}-{}-{}.txt",
        name,
        std::process::id(),
        FILE_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let text = setup.to_text().expect("insecure setup points serialize");
    std::fs::write(&path, text).expect("temp dir is writable");
    path
}

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A G1 point on the curve but outside the prime-order subgroup.
pub fn g1_point_outside_subgroup() -> G1Affine {
    (1u64..)
        .filter_map(|x| G1Affine::get_point_from_x_unchecked(x.into(), false))
        .find(|p| !p.is_in_correct_subgroup_assuming_on_curve())
        .expect("almost every curve point lies outside the subgroup")
}

/// A blob of uniformly random field elements.
pub fn random_blob<R: RngCore>(rng: &mut R) -> Blob {
    let elements: Vec<Fr> = (0..FIELD_ELEMENTS_PER_BLOB).map(|_| Fr::rand(rng)).collect();
    Blob::from_field_elements(&elements).expect("element count matches the blob size")
}

/// A random field element, as the 32 canonical big-endian bytes.
pub fn random_fr_bytes<R: RngCore>(rng: &mut R) -> [u8; 32] {
    helpers::fr_to_bytes_be(&Fr::rand(rng))
}
