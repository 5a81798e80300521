use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField};
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    test_rng, One, UniformRand, Zero,
};
use blob_kzg_primitives::{
    consts::{
        BYTES_PER_FIELD_ELEMENT, FIAT_SHAMIR_PROTOCOL_DOMAIN, FIELD_ELEMENTS_PER_BLOB,
        SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED,
    },
    errors::KzgError,
    helpers::{
        bytes_to_fr, bytes_to_g1, calculate_roots_of_unity, compute_aggregated_poly_and_commitment,
        compute_challenges, compute_powers, evaluate_polynomial_in_evaluation_form, fr_to_bytes_be,
        g1_lincomb, g1_to_bytes, hash_to_field_element, pairings_verify, usize_to_be_bytes,
        validate_g1_point, validate_g2_point,
    },
    polynomial::PolynomialEvalForm,
    traits::ReadPointFromBytes,
};
use sha2::{Digest, Sha256};

fn random_eval_poly(len: usize, seed: u64) -> PolynomialEvalForm {
    let mut rng = StdRng::seed_from_u64(seed);
    PolynomialEvalForm::new((0..len).map(|_| Fr::rand(&mut rng)).collect()).unwrap()
}

fn point_outside_subgroup() -> G1Affine {
    (1u64..)
        .filter_map(|x| G1Affine::get_point_from_x_unchecked(x.into(), false))
        .find(|p| !p.is_in_correct_subgroup_assuming_on_curve())
        .unwrap()
}

fn random_g1() -> G1Affine {
    let mut rng = test_rng();
    G1Projective::rand(&mut rng).into_affine()
}

#[test]
fn test_fr_bytes_round_trip() {
    let mut rng = test_rng();
    for _ in 0..32 {
        let element = Fr::rand(&mut rng);
        let bytes = fr_to_bytes_be(&element);
        assert_eq!(bytes_to_fr(&bytes).unwrap(), element);
    }
    assert_eq!(fr_to_bytes_be(&Fr::one())[31], 1);
    assert!(fr_to_bytes_be(&Fr::one())[..31].iter().all(|b| *b == 0));
}

#[test]
fn test_bytes_to_fr_rejects_non_canonical() {
    assert!(matches!(
        bytes_to_fr(&[0xff; BYTES_PER_FIELD_ELEMENT]),
        Err(KzgError::InvalidFieldElement(_))
    ));

    // -1 is canonical, -1 + r = r is not.
    let mut bytes = fr_to_bytes_be(&-Fr::one());
    assert!(bytes_to_fr(&bytes).is_ok());
    bytes[31] += 1;
    assert!(matches!(
        bytes_to_fr(&bytes),
        Err(KzgError::InvalidFieldElement(_))
    ));
}

#[test]
fn test_g1_bytes_round_trip() {
    let point = random_g1();
    let bytes = g1_to_bytes(&point).unwrap();
    assert_eq!(bytes.len(), SIZE_OF_G1_AFFINE_COMPRESSED);
    assert_eq!(bytes_to_g1(&bytes).unwrap(), point);

    // Identity: compression and infinity flags set, everything else zero.
    let identity = g1_to_bytes(&G1Affine::zero()).unwrap();
    assert_eq!(identity[0], 0xc0);
    assert!(identity[1..].iter().all(|b| *b == 0));
    assert!(bytes_to_g1(&identity).unwrap().is_zero());
}

#[test]
fn test_bytes_to_g1_rejects_invalid_points() {
    // Missing compression flag.
    let mut bytes = g1_to_bytes(&random_g1()).unwrap();
    bytes[0] &= 0x7f;
    assert!(matches!(
        bytes_to_g1(&bytes),
        Err(KzgError::NotOnCurveError(_))
    ));

    let outside = g1_to_bytes(&point_outside_subgroup()).unwrap();
    assert!(matches!(
        bytes_to_g1(&outside),
        Err(KzgError::NotOnCurveError(_))
    ));

    assert!(bytes_to_g1(&[0xff; SIZE_OF_G1_AFFINE_COMPRESSED]).is_err());
}

#[test]
fn test_validate_points() {
    assert!(validate_g1_point(&G1Affine::generator()).is_ok());
    assert!(validate_g1_point(&G1Affine::zero()).is_ok());
    assert!(matches!(
        validate_g1_point(&point_outside_subgroup()),
        Err(KzgError::NotOnCurveError(_))
    ));
    assert!(validate_g2_point(&G2Affine::generator()).is_ok());
    assert!(validate_g2_point(&G2Affine::zero()).is_ok());
}

#[test]
fn test_compute_powers() {
    let base = Fr::from(3u64);
    assert_eq!(
        compute_powers(&base, 4),
        vec![
            Fr::one(),
            Fr::from(3u64),
            Fr::from(9u64),
            Fr::from(27u64)
        ]
    );
    assert!(compute_powers(&base, 0).is_empty());
}

#[test]
fn test_g1_lincomb() {
    let g = G1Affine::generator();
    let points = vec![g, (g * Fr::from(2u64)).into_affine()];
    let scalars = vec![Fr::from(5u64), Fr::from(7u64)];
    let expected = (g * Fr::from(19u64)).into_affine();
    assert_eq!(g1_lincomb(&points, &scalars).unwrap(), expected);
    assert!(g1_lincomb(&[], &[]).unwrap().is_zero());
}

#[test]
fn test_pairings_verify() {
    let a = Fr::from(6u64);
    let b = Fr::from(7u64);
    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();

    // e(6·G1, 7·G2) = e(42·G1, G2)
    let a1 = (g1 * a).into_affine();
    let a2 = (g2 * b).into_affine();
    let b1 = (g1 * (a * b)).into_affine();
    assert!(pairings_verify(a1, a2, b1, g2));
    assert!(!pairings_verify(a1, a2, g1, g2));
}

#[test]
fn test_hash_to_field_element() {
    let digest = Sha256::digest(b"abc");
    assert_eq!(
        hash_to_field_element(b"abc"),
        Fr::from_be_bytes_mod_order(&digest)
    );
    assert_eq!(usize_to_be_bytes(4096), [0, 0, 0, 0, 0, 0, 0x10, 0]);
}

#[test]
fn test_compute_challenges_transcript() {
    let polys = vec![random_eval_poly(FIELD_ELEMENTS_PER_BLOB, 0)];
    let commitments = vec![random_g1()];
    let (r_powers, x) = compute_challenges(&polys, &commitments).unwrap();

    let mut data = FIAT_SHAMIR_PROTOCOL_DOMAIN.to_vec();
    data.extend_from_slice(&4096u64.to_be_bytes());
    data.extend_from_slice(&1u64.to_be_bytes());
    data.extend_from_slice(&polys[0].to_bytes_be());
    data.extend_from_slice(&g1_to_bytes(&commitments[0]).unwrap());
    let hashed = Sha256::digest(&data);

    let mut input = hashed.to_vec();
    input.push(0x00);
    let r = hash_to_field_element(&input);
    input[32] = 0x01;
    let expected_x = hash_to_field_element(&input);

    assert_eq!(r_powers, vec![Fr::one()]);
    assert_eq!(x, expected_x);
    assert_ne!(r, expected_x);
}

#[test]
fn test_compute_challenges_powers_and_order() {
    let polys = vec![
        random_eval_poly(8, 1),
        random_eval_poly(8, 2),
        random_eval_poly(8, 3),
    ];
    let commitments = vec![
        G1Affine::generator(),
        (G1Affine::generator() * Fr::from(2u64)).into_affine(),
        (G1Affine::generator() * Fr::from(3u64)).into_affine(),
    ];
    let (r_powers, x) = compute_challenges(&polys, &commitments).unwrap();
    assert_eq!(r_powers.len(), 3);
    assert_eq!(r_powers[0], Fr::one());
    assert_eq!(r_powers[2], r_powers[1].square());

    // Deterministic.
    assert_eq!(
        compute_challenges(&polys, &commitments).unwrap(),
        (r_powers.clone(), x)
    );

    // Swapping two entries changes both challenges.
    let swapped_polys = vec![polys[1].clone(), polys[0].clone(), polys[2].clone()];
    let swapped_commitments = vec![commitments[1], commitments[0], commitments[2]];
    let (swapped_r, swapped_x) =
        compute_challenges(&swapped_polys, &swapped_commitments).unwrap();
    assert_ne!(swapped_r[1], r_powers[1]);
    assert_ne!(swapped_x, x);
}

#[test]
fn test_compute_challenges_length_mismatch() {
    let polys = vec![random_eval_poly(8, 0)];
    assert!(matches!(
        compute_challenges(&polys, &[]),
        Err(KzgError::BadArgs(_))
    ));
}

#[test]
fn test_compute_challenges_empty() {
    let (r_powers, _) = compute_challenges(&[], &[]).unwrap();
    assert!(r_powers.is_empty());
    assert!(matches!(
        compute_aggregated_poly_and_commitment(&[], &[]),
        Err(KzgError::BadArgs(_))
    ));
}

#[test]
fn test_aggregated_poly_and_commitment_single() {
    // With one blob r^0 = 1, so the aggregate is the input itself.
    let poly = random_eval_poly(FIELD_ELEMENTS_PER_BLOB, 0);
    let commitment = random_g1();
    let (aggregated, aggregated_commitment, x) =
        compute_aggregated_poly_and_commitment(&[poly.clone()], &[commitment]).unwrap();
    assert_eq!(aggregated, poly);
    assert_eq!(aggregated_commitment, commitment);
    assert_eq!(compute_challenges(&[poly], &[commitment]).unwrap().1, x);
}

#[test]
fn test_barycentric_matches_horner() {
    let mut rng = test_rng();
    let poly = random_eval_poly(FIELD_ELEMENTS_PER_BLOB, 0);
    let roots = calculate_roots_of_unity(FIELD_ELEMENTS_PER_BLOB).unwrap();
    let coeffs = poly.to_coeff_form().unwrap();

    for _ in 0..4 {
        let z = Fr::rand(&mut rng);
        assert_eq!(
            evaluate_polynomial_in_evaluation_form(&poly, &z, &roots).unwrap(),
            coeffs.evaluate(&z)
        );
    }

    // Points of the domain return the stored evaluation.
    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&poly, &roots[5], &roots).unwrap(),
        poly.evaluations()[5]
    );
}

#[test]
fn test_barycentric_length_mismatch() {
    let poly = random_eval_poly(8, 0);
    let roots = calculate_roots_of_unity(16).unwrap();
    assert_eq!(
        evaluate_polynomial_in_evaluation_form(&poly, &Fr::zero(), &roots),
        Err(KzgError::InvalidInputLength)
    );
}

#[test]
fn test_calculate_roots_of_unity() {
    let roots = calculate_roots_of_unity(FIELD_ELEMENTS_PER_BLOB).unwrap();
    assert_eq!(roots.len(), FIELD_ELEMENTS_PER_BLOB);
    assert_eq!(roots[0], Fr::one());
    assert_eq!(roots[1].pow([FIELD_ELEMENTS_PER_BLOB as u64]), Fr::one());
    assert_ne!(roots[1].pow([FIELD_ELEMENTS_PER_BLOB as u64 / 2]), Fr::one());
    assert_eq!(roots[2], roots[1].square());

    assert!(matches!(
        calculate_roots_of_unity(3000),
        Err(KzgError::FFTError(_))
    ));
    assert!(matches!(
        calculate_roots_of_unity(0),
        Err(KzgError::FFTError(_))
    ));
}

#[test]
fn test_point_codec_for_both_groups() {
    let g1 = (G1Affine::generator() * Fr::from(5u64)).into_affine();
    let g2 = (G2Affine::generator() * Fr::from(5u64)).into_affine();

    let g1_bytes = g1.to_bytes_compressed().unwrap();
    let g2_bytes = g2.to_bytes_compressed().unwrap();
    assert_eq!(g1_bytes.len(), SIZE_OF_G1_AFFINE_COMPRESSED);
    assert_eq!(g2_bytes.len(), SIZE_OF_G2_AFFINE_COMPRESSED);
    assert_eq!(G1Affine::COMPRESSED_SIZE, SIZE_OF_G1_AFFINE_COMPRESSED);
    assert_eq!(G2Affine::COMPRESSED_SIZE, SIZE_OF_G2_AFFINE_COMPRESSED);

    assert_eq!(G1Affine::read_point_from_bytes_compressed(&g1_bytes).unwrap(), g1);
    assert_eq!(G2Affine::read_point_from_bytes_compressed(&g2_bytes).unwrap(), g2);

    // A g1 encoding is never a g2 encoding and vice versa.
    assert!(G2Affine::read_point_from_bytes_compressed(&g1_bytes).is_err());
    assert!(G1Affine::read_point_from_bytes_compressed(&g2_bytes).is_err());
}

#[test]
fn test_point_codec_rejects_bad_flags() {
    // Infinity flag with a nonzero x coordinate.
    let mut bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    bytes[0] = 0xc0;
    bytes[47] = 1;
    assert!(bytes_to_g1(&bytes).is_err());

    // Infinity with the sort bit set.
    let mut bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    bytes[0] = 0xe0;
    assert!(bytes_to_g1(&bytes).is_err());

    // Infinity without the compression flag.
    let mut bytes = [0u8; SIZE_OF_G1_AFFINE_COMPRESSED];
    bytes[0] = 0x40;
    assert!(bytes_to_g1(&bytes).is_err());

    let mut g2_infinity = [0u8; SIZE_OF_G2_AFFINE_COMPRESSED];
    g2_infinity[0] = 0xc0;
    assert!(G2Affine::read_point_from_bytes_compressed(&g2_infinity)
        .unwrap()
        .is_zero());
}

#[test]
fn test_bytes_to_fr_modulus_boundary() {
    let minus_one = fr_to_bytes_be(&-Fr::one());
    assert_eq!(bytes_to_fr(&minus_one).unwrap(), -Fr::one());

    let mut modulus = minus_one;
    modulus[31] += 1;
    assert!(bytes_to_fr(&modulus).is_err());
}
