use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, BigInteger, Field, PrimeField};
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use ark_std::{One, Zero};
use sha2::{Digest, Sha256};

use crate::{
    consts::{
        BYTES_PER_FIELD_ELEMENT, FIAT_SHAMIR_PROTOCOL_DOMAIN, FIELD_ELEMENTS_PER_BLOB,
        SIZE_OF_G1_AFFINE_COMPRESSED,
    },
    errors::KzgError,
    polynomial::PolynomialEvalForm,
    traits::{ReadFrFromBytes, ReadPointFromBytes},
};

/// Interprets `data` as a big-endian integer and reduces it modulo the field
/// order. Only for bytes that were already validated as canonical, or for
/// hash outputs.
pub fn set_bytes_canonical(data: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(data)
}

/// Canonical 32-byte big-endian encoding of a field element.
pub fn fr_to_bytes_be(element: &Fr) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut out = [0u8; BYTES_PER_FIELD_ELEMENT];
    let bytes = element.into_bigint().to_bytes_be();
    // into_bigint is 32 bytes for the BLS12-381 scalar field; right-align anyway.
    out[BYTES_PER_FIELD_ELEMENT - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Concatenates the canonical encodings of `data_fr`.
pub fn to_byte_array(data_fr: &[Fr]) -> Vec<u8> {
    let mut data = Vec::with_capacity(data_fr.len() * BYTES_PER_FIELD_ELEMENT);
    for element in data_fr {
        data.extend_from_slice(&fr_to_bytes_be(element));
    }
    data
}

/// Decodes a canonical big-endian field element. Values greater than or equal
/// to the modulus are rejected, never reduced.
pub fn bytes_to_fr(bytes: &[u8; BYTES_PER_FIELD_ELEMENT]) -> Result<Fr, KzgError> {
    Fr::deserialize_from_bytes_be(bytes)
        .map_err(|e| KzgError::InvalidFieldElement(format!("{}", e)))
}

/// Decodes and validates a compressed G1 point (on curve, in subgroup).
pub fn bytes_to_g1(bytes: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED]) -> Result<G1Affine, KzgError> {
    G1Affine::read_point_from_bytes_compressed(bytes)
        .map_err(|e| KzgError::NotOnCurveError(format!("invalid g1 point: {}", e)))
}

pub fn g1_to_bytes(
    point: &G1Affine,
) -> Result<[u8; SIZE_OF_G1_AFFINE_COMPRESSED], KzgError> {
    let bytes = point
        .to_bytes_compressed()
        .map_err(|e| KzgError::SerializationError(format!("g1 point: {}", e)))?;
    let mut out = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Validates that the blob data contains canonical field elements.
/// The data provided is expected to be in big-endian format.
pub fn validate_blob_data_as_canonical_field_elements(data: &[u8]) -> Result<(), KzgError> {
    if data.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(KzgError::InvalidInputLength);
    }

    for (i, chunk) in data.chunks_exact(BYTES_PER_FIELD_ELEMENT).enumerate() {
        Fr::deserialize_from_bytes_be(chunk)
            .map(|_| ())
            .map_err(|_| {
                KzgError::InvalidFieldElement(format!(
                    "Field element at position {} is not canonical or invalid",
                    i
                ))
            })?;
    }
    Ok(())
}

/// Validates that a G1 point is on the curve and in the prime-order subgroup.
///
/// Unlike proofs in other schemes, the identity is a legitimate value here:
/// it is the commitment to the all-zero blob and the proof for any constant
/// polynomial.
pub fn validate_g1_point(point: &G1Affine) -> Result<(), KzgError> {
    if point.is_zero() {
        return Ok(());
    }

    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G1 point not on curve".to_string(),
        ));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G1 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a G2 point is on the curve and in the prime-order subgroup.
pub fn validate_g2_point(point: &G2Affine) -> Result<(), KzgError> {
    if point.is_zero() {
        return Ok(());
    }

    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G2 point not on curve".to_string(),
        ));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G2 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}

/// Computes powers of a field element up to a given exponent.
///
/// For a given field element x, computes [1, x, x², x³, ..., x^(count-1)]
pub fn compute_powers(base: &Fr, count: usize) -> Vec<Fr> {
    let mut powers = Vec::with_capacity(count);
    let mut current = Fr::one();
    for _ in 0..count {
        powers.push(current);
        current *= base;
    }
    powers
}

/// Computes a linear combination of G1 points weighted by scalar coefficients.
///
/// Given points P₁, P₂, ..., Pₙ and scalars s₁, s₂, ..., sₙ
/// Computes: s₁P₁ + s₂P₂ + ... + sₙPₙ using MSM.
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    let lincomb = G1Projective::msm(points, scalars).map_err(|e| {
        KzgError::MsmError(format!(
            "{} points and {} scalars (mismatch at {})",
            points.len(),
            scalars.len(),
            e
        ))
    })?;
    Ok(lincomb.into_affine())
}

/// Maps a byte slice to a field element (`Fr`) by hashing it with SHA-256 and
/// reducing the big-endian digest modulo the field order.
pub fn hash_to_field_element(msg: &[u8]) -> Fr {
    let msg_digest = Sha256::digest(msg);
    Fr::from_be_bytes_mod_order(msg_digest.as_slice())
}

/// Checks `e(a1, a2) == e(b1, b2)` with a single multi-pairing.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bls12_381::multi_pairing(p, q);
    result.is_zero()
}

/// Converts a usize to a byte array in big-endian format always returning 8 bytes.
pub fn usize_to_be_bytes(number: usize) -> [u8; 8] {
    (number as u64).to_be_bytes()
}

/// Derives the Fiat-Shamir challenges for an aggregate proof.
///
/// The transcript is
/// `DOMAIN || u64_be(FIELD_ELEMENTS_PER_BLOB) || u64_be(n) || evaluations of
/// every polynomial || every commitment (compressed)`, hashed once with
/// SHA-256. The combination scalar `r` and the evaluation point are then
/// obtained by hashing that digest with a `0x00` and `0x01` suffix
/// respectively.
///
/// Returns `([r^0, r^1, ..., r^(n-1)], evaluation_challenge)`. The transcript
/// is order-sensitive: permuting the inputs changes both challenges.
pub fn compute_challenges(
    polynomials: &[PolynomialEvalForm],
    commitments: &[G1Affine],
) -> Result<(Vec<Fr>, Fr), KzgError> {
    if polynomials.len() != commitments.len() {
        return Err(KzgError::BadArgs(format!(
            "{} polynomials but {} commitments",
            polynomials.len(),
            commitments.len()
        )));
    }
    let n = polynomials.len();

    let evaluations_size: usize = polynomials
        .iter()
        .map(|p| p.len() * BYTES_PER_FIELD_ELEMENT)
        .sum();
    let challenge_input_size = FIAT_SHAMIR_PROTOCOL_DOMAIN.len()
        + 8
        + 8
        + evaluations_size
        + n * SIZE_OF_G1_AFFINE_COMPRESSED;

    let mut data = Vec::with_capacity(challenge_input_size);
    data.extend_from_slice(FIAT_SHAMIR_PROTOCOL_DOMAIN);
    data.extend_from_slice(&usize_to_be_bytes(FIELD_ELEMENTS_PER_BLOB));
    data.extend_from_slice(&usize_to_be_bytes(n));
    for polynomial in polynomials {
        data.extend_from_slice(&polynomial.to_bytes_be());
    }
    for commitment in commitments {
        data.extend_from_slice(&g1_to_bytes(commitment)?);
    }

    let hashed_data = Sha256::digest(&data);

    let mut r_input = [0u8; 33];
    r_input[..32].copy_from_slice(hashed_data.as_slice());
    let r = hash_to_field_element(&r_input);

    r_input[32] = 0x01;
    let evaluation_challenge = hash_to_field_element(&r_input);

    Ok((compute_powers(&r, n), evaluation_challenge))
}

/// Combines polynomials and their commitments with the Fiat-Shamir scalar
/// `r`: returns `(Σ r^j·p_j, Σ r^j·C_j, evaluation_challenge)`.
///
/// Both the prover and the verifier go through this function so that the
/// aggregation cannot drift between them.
pub fn compute_aggregated_poly_and_commitment(
    polynomials: &[PolynomialEvalForm],
    commitments: &[G1Affine],
) -> Result<(PolynomialEvalForm, G1Affine, Fr), KzgError> {
    if polynomials.is_empty() {
        return Err(KzgError::BadArgs(
            "aggregation requires at least one blob".to_string(),
        ));
    }
    let (r_powers, evaluation_challenge) = compute_challenges(polynomials, commitments)?;
    let aggregated_poly = PolynomialEvalForm::linear_combination(polynomials, &r_powers)?;
    let aggregated_commitment = g1_lincomb(commitments, &r_powers)?;
    Ok((aggregated_poly, aggregated_commitment, evaluation_challenge))
}

/// Evaluates a polynomial given in evaluation form at an arbitrary point `z`
/// with the barycentric formula
/// `f(z) = (z^n - 1) / n * Σ f_i * ω_i / (z - ω_i)`.
///
/// `roots_of_unity` must be the domain the evaluations were taken over. When
/// `z` is itself a root of unity the stored evaluation is returned.
pub fn evaluate_polynomial_in_evaluation_form(
    polynomial: &PolynomialEvalForm,
    z: &Fr,
    roots_of_unity: &[Fr],
) -> Result<Fr, KzgError> {
    let width = polynomial.len();
    if width != roots_of_unity.len() {
        return Err(KzgError::InvalidInputLength);
    }
    if width == 0 {
        return Err(KzgError::BadArgs("Empty polynomial domain".to_string()));
    }

    if let Some(index) = roots_of_unity.iter().position(|domain_i| domain_i == z) {
        return Ok(polynomial.evaluations()[index]);
    }

    let inverse_width = Fr::from(width as u64)
        .inverse()
        .ok_or(KzgError::InvalidDenominator)?;

    // z is not in the domain, so none of the denominators is zero.
    let mut denominators: Vec<Fr> = roots_of_unity.iter().map(|w| *z - w).collect();
    batch_inversion(&mut denominators);

    let sum = polynomial
        .evaluations()
        .iter()
        .zip(roots_of_unity)
        .zip(&denominators)
        .fold(Fr::zero(), |acc, ((f_i, w_i), inv)| acc + *f_i * w_i * inv);

    let r = z.pow([width as u64]) - Fr::one();
    Ok(sum * r * inverse_width)
}

/// The `length` roots of unity of the evaluation domain, in natural order.
/// `length` must be a power of two.
pub fn calculate_roots_of_unity(length: usize) -> Result<Vec<Fr>, KzgError> {
    if !length.is_power_of_two() {
        return Err(KzgError::FFTError(format!(
            "domain size {} is not a power of two",
            length
        )));
    }
    let domain = GeneralEvaluationDomain::<Fr>::new(length).ok_or_else(|| {
        KzgError::FFTError(format!("no evaluation domain of size {}", length))
    })?;
    Ok(domain.elements().take(length).collect())
}
