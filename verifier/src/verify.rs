use ark_bls12_381::{Fr, G1Affine};
use ark_ec::{AffineRepr, CurveGroup};
use blob_kzg_primitives::{
    consts::{BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_COMPRESSED},
    errors::KzgError,
    helpers,
    setup::TrustedSetup,
};
use tracing::debug;

/// This function performs verification of a KZG proof where the commitment, proof,
/// evaluation value, and evaluation point are provided as deserialized curve points
/// and field elements. It implements the core KZG proof verification algorithm
/// using bilinear pairings.
///
/// # Arguments
///
/// * `commitment` - A `G1Affine` point representing the KZG commitment to a polynomial
/// * `z_fr` - A field element representing the evaluation point
/// * `value_fr` - A field element representing the claimed polynomial value at the evaluation point
/// * `proof` - A `G1Affine` point representing the KZG proof for the evaluation
/// * `setup` - The trusted setup providing `[1]₂` and `[τ]₂`
///
/// # Returns
///
/// * `Ok(true)` - If the proof is valid and verification succeeds
/// * `Ok(false)` - If the proof is invalid but no errors occurred during verification
/// * `Err(KzgError)` - If a point is not on the curve or not in the prime-order subgroup
///
/// The identity is a valid commitment and a valid proof: it commits to the
/// zero polynomial and opens any constant polynomial.
///
/// # Examples
///
/// ```rust,no_run
/// use blob_kzg_verifier::verify::verify_kzg_proof_impl;
/// use blob_kzg_primitives::setup::TrustedSetup;
/// use ark_bls12_381::{G1Affine, Fr};
/// use ark_ff::One;
/// use ark_ec::AffineRepr;
///
/// let setup = TrustedSetup::load("trusted_setup.txt").unwrap();
/// let commitment = G1Affine::generator(); // Example commitment
/// let proof = G1Affine::generator();      // Example proof
/// let value = Fr::one();                  // Claimed polynomial value
/// let z = Fr::one();                      // Evaluation point
///
/// match verify_kzg_proof_impl(commitment, z, value, proof, &setup) {
///     Ok(true) => println!("Proof is valid!"),
///     Ok(false) => println!("Proof is invalid"),
///     Err(e) => println!("Verification error: {}", e),
/// }
/// ```
pub fn verify_kzg_proof_impl(
    commitment: G1Affine,
    z_fr: Fr,
    value_fr: Fr,
    proof: G1Affine,
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    helpers::validate_g1_point(&commitment)
        .map_err(|_| KzgError::NotOnCurveError("commitment not on curve".to_string()))?;
    helpers::validate_g1_point(&proof)
        .map_err(|_| KzgError::NotOnCurveError("proof not on curve".to_string()))?;

    let g2_generator = setup.g2()[0];

    // Compute [value]*G1
    let value_g1 = (G1Affine::generator() * value_fr).into_affine();

    // Compute [C - value*G1]
    // If the claim is valid, this equals q(τ)(τ - z)
    let commit_minus_value = (commitment - value_g1).into_affine();

    // Compute [τ - z]*G2
    let z_g2 = (g2_generator * z_fr).into_affine();
    let x_minus_z = (setup.g2_tau() - z_g2).into_affine();

    // e(proof, [τ - z]₂) = e([C - value]₁, [1]₂)
    let verified = helpers::pairings_verify(proof, x_minus_z, commit_minus_value, g2_generator);
    debug!(verified, "verified kzg proof");
    Ok(verified)
}

/// This function performs verification of a KZG proof where the commitment, proof,
/// evaluation value, and evaluation point are provided as compressed byte arrays
/// in big-endian format. It deserializes the inputs and delegates to
/// [verify_kzg_proof_impl].
///
/// # Arguments
///
/// * `commitment` - A 48-byte compressed G1 point, the KZG commitment
/// * `z` - A 32-byte big-endian canonical field element, the evaluation point
/// * `y` - A 32-byte big-endian canonical field element, the claimed value
/// * `proof` - A 48-byte compressed G1 point, the KZG proof
/// * `setup` - The trusted setup
///
/// # Returns
///
/// * `Ok(true)` - If the proof is valid and verification succeeds
/// * `Ok(false)` - If the encodings are well formed but the proof does not verify
/// * `Err(KzgError)` - If any encoding is malformed: a field element at or
///   above the modulus, bad flag bits, or a point off the curve or outside the
///   subgroup. Nothing is reduced or repaired.
///
/// # Examples
///
/// ```rust,no_run
/// use blob_kzg_verifier::verify::verify_kzg_proof;
/// use blob_kzg_primitives::{
///     consts::{BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_COMPRESSED},
///     setup::TrustedSetup,
/// };
///
/// let setup = TrustedSetup::load("trusted_setup.txt").unwrap();
/// let commitment = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED]; // Compressed commitment
/// let proof = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];      // Compressed proof
/// let y = [0u8; BYTES_PER_FIELD_ELEMENT];               // Polynomial value
/// let z = [0u8; BYTES_PER_FIELD_ELEMENT];               // Evaluation point
///
/// match verify_kzg_proof(&commitment, &z, &y, &proof, &setup) {
///     Ok(true) => println!("Proof is valid!"),
///     Ok(false) => println!("Proof is invalid"),
///     Err(e) => println!("Verification error: {}", e),
/// }
/// ```
pub fn verify_kzg_proof(
    commitment: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED],
    z: &[u8; BYTES_PER_FIELD_ELEMENT],
    y: &[u8; BYTES_PER_FIELD_ELEMENT],
    proof: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED],
    setup: &TrustedSetup,
) -> Result<bool, KzgError> {
    let commitment = helpers::bytes_to_g1(commitment)?;
    let z_fr = helpers::bytes_to_fr(z)?;
    let value_fr = helpers::bytes_to_fr(y)?;
    let proof = helpers::bytes_to_g1(proof)?;
    verify_kzg_proof_impl(commitment, z_fr, value_fr, proof, setup)
}
