use ark_bls12_381::G1Affine;
use blob_kzg_primitives::{
    blob::Blob,
    consts::SIZE_OF_G1_AFFINE_COMPRESSED,
    errors::KzgError,
    helpers,
    polynomial::PolynomialEvalForm,
    setup::TrustedSetup,
};
use rayon::prelude::*;
use tracing::debug;

use crate::verify::verify_kzg_proof_impl;

// verify_aggregate_proof_impl checks one aggregate proof against many blobs and their
// commitments in Affine form. It acts as the helper behind verify_aggregate_kzg_proof
// but also lets callers that already hold decoded values verify directly.
//
// The folded polynomial and commitment are rebuilt here from the blobs and the
// supplied commitments, and the claimed value is recomputed with the barycentric
// formula. Nothing about the evaluation is taken from the prover.
pub fn verify_aggregate_proof_impl(
    blobs: &[Blob],
    commitments: &[G1Affine],
    aggregated_proof: &G1Affine,
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    if blobs.len() != commitments.len() {
        return Err(KzgError::BadArgs(format!(
            "{} blobs but {} commitments",
            blobs.len(),
            commitments.len()
        )));
    }
    if blobs.is_empty() {
        return Err(KzgError::BadArgs(
            "aggregate verification requires at least one blob".to_string(),
        ));
    }

    // Validate that all commitments are valid points on the G1 curve
    commitments
        .par_iter()
        .try_for_each(helpers::validate_g1_point)?;

    let polynomials = blobs
        .par_iter()
        .map(|blob| blob.to_polynomial_eval_form())
        .collect::<Result<Vec<PolynomialEvalForm>, KzgError>>()?;

    let (aggregated_poly, aggregated_commitment, evaluation_challenge) =
        helpers::compute_aggregated_poly_and_commitment(&polynomials, commitments)?;

    let y = helpers::evaluate_polynomial_in_evaluation_form(
        &aggregated_poly,
        &evaluation_challenge,
        setup.roots_of_unity(),
    )?;
    debug!(blobs = blobs.len(), "recomputed aggregate evaluation");

    verify_kzg_proof_impl(
        aggregated_commitment,
        evaluation_challenge,
        y,
        *aggregated_proof,
        setup,
    )
}

/// Verifies an aggregate proof over serialized blobs and compressed
/// commitments. The blobs and commitments must be given in the order the
/// proof was computed for.
///
/// # Returns
///
/// * `Ok(true)` - If the aggregate proof verifies
/// * `Ok(false)` - If the inputs are well formed but the proof does not verify
/// * `Err(KzgError)` - On a length mismatch, an empty input, a malformed blob
///   or a malformed point
pub fn verify_aggregate_kzg_proof(
    blobs: &[Vec<u8>],
    commitments: &[[u8; SIZE_OF_G1_AFFINE_COMPRESSED]],
    aggregated_proof: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED],
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    if blobs.len() != commitments.len() {
        return Err(KzgError::BadArgs(format!(
            "{} blobs but {} commitments",
            blobs.len(),
            commitments.len()
        )));
    }

    let blobs = blobs
        .par_iter()
        .map(|blob| Blob::new(blob))
        .collect::<Result<Vec<_>, _>>()?;
    let commitments = commitments
        .iter()
        .map(helpers::bytes_to_g1)
        .collect::<Result<Vec<_>, _>>()?;
    let aggregated_proof = helpers::bytes_to_g1(aggregated_proof)?;

    verify_aggregate_proof_impl(&blobs, &commitments, &aggregated_proof, setup)
}
