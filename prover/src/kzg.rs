use ark_bls12_381::{Fr, G1Affine};
use ark_std::One;
use rayon::prelude::*;
use tracing::debug;

use blob_kzg_primitives::{
    blob::Blob,
    consts::{BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_BLOB, SIZE_OF_G1_AFFINE_COMPRESSED},
    errors::KzgError,
    helpers,
    polynomial::{PolynomialCoeffForm, PolynomialEvalForm},
    setup::TrustedSetup,
};

/// Main interesting struct of the blob-kzg prover crate.
/// [KZG] provides methods for committing to a blob (either via a [Blob]
/// itself, or a [PolynomialCoeffForm] or [PolynomialEvalForm]), and for
/// generating single and aggregate proofs.
///
/// The engine holds no state: every method takes the [TrustedSetup] it works
/// against, so one setup can back any number of engines across threads.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct KZG;

impl KZG {
    pub fn new() -> Self {
        Self
    }

    /// Commit to a polynomial in evaluation form over the blob domain, as an
    /// MSM against the Lagrange table of `setup`.
    pub fn commit_eval_form(
        &self,
        polynomial: &PolynomialEvalForm,
        setup: &TrustedSetup,
    ) -> Result<G1Affine, KzgError> {
        let bases = setup.g1_lagrange();
        if polynomial.len() > bases.len() {
            return Err(KzgError::SrsCapacityExceeded {
                polynomial_len: polynomial.len(),
                srs_len: bases.len(),
            });
        }
        // Lagrange points only exist for the full blob domain.
        if polynomial.len() != bases.len() {
            return Err(KzgError::BadArgs(format!(
                "evaluation form commitments need {} evaluations, got {}",
                bases.len(),
                polynomial.len()
            )));
        }

        helpers::g1_lincomb(bases, polynomial.evaluations())
    }

    /// Commit to a polynomial in coefficient form, as an MSM against the
    /// monomial table of `setup`.
    pub fn commit_coeff_form(
        &self,
        polynomial: &PolynomialCoeffForm,
        setup: &TrustedSetup,
    ) -> Result<G1Affine, KzgError> {
        let bases = setup.g1_monomial();
        if polynomial.len() > bases.len() {
            return Err(KzgError::SrsCapacityExceeded {
                polynomial_len: polynomial.len(),
                srs_len: bases.len(),
            });
        }

        helpers::g1_lincomb(&bases[..polynomial.len()], polynomial.coeffs())
    }

    /// commit to a [Blob], by transforming it into a [PolynomialEvalForm] and
    /// then calling [KZG::commit_eval_form].
    pub fn commit_blob(&self, blob: &Blob, setup: &TrustedSetup) -> Result<G1Affine, KzgError> {
        let polynomial = blob.to_polynomial_eval_form()?;
        self.commit_eval_form(&polynomial, setup)
    }

    /// Commits to every blob in parallel. The output order matches the input.
    pub fn commit_blobs(
        &self,
        blobs: &[Blob],
        setup: &TrustedSetup,
    ) -> Result<Vec<G1Affine>, KzgError> {
        blobs
            .par_iter()
            .map(|blob| self.commit_blob(blob, setup))
            .collect()
    }

    /// Compute a kzg proof that `polynomial(z) = y`, returning `(proof, y)`.
    ///
    /// The polynomial is brought into coefficient form, `y` is evaluated with
    /// Horner, and the quotient `(p(X) - y) / (X - z)` is obtained by long
    /// division and committed against the monomial table. The division is
    /// exact because `z` is a root of `p(X) - y`; the remainder is not
    /// re-checked.
    pub fn compute_kzg_proof(
        &self,
        polynomial: &PolynomialEvalForm,
        z_fr: &Fr,
        setup: &TrustedSetup,
    ) -> Result<(G1Affine, Fr), KzgError> {
        if polynomial.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::BadArgs(format!(
                "expected a polynomial over {} evaluations, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                polynomial.len()
            )));
        }

        let coeff_form = polynomial.to_coeff_form()?;
        let y_fr = coeff_form.evaluate(z_fr);

        // Dividing by X - z, lowest degree first.
        let divisor = PolynomialCoeffForm::new(vec![-*z_fr, Fr::one()]);
        let quotient = coeff_form.sub_constant(&y_fr).long_div(&divisor)?;
        debug!(quotient_len = quotient.len(), "computed opening quotient");

        let proof = self.commit_coeff_form(&quotient, setup)?;
        Ok((proof, y_fr))
    }

    /// Folds `blobs` into one polynomial and one commitment with powers of the
    /// Fiat-Shamir scalar `r`, and opens the folded polynomial at the
    /// Fiat-Shamir evaluation challenge.
    ///
    /// The verifier rebuilds the same folding from the blobs and the
    /// commitments, see `blob_kzg_verifier::aggregate`.
    pub fn compute_aggregate_proof(
        &self,
        blobs: &[Blob],
        setup: &TrustedSetup,
    ) -> Result<G1Affine, KzgError> {
        if blobs.is_empty() {
            return Err(KzgError::BadArgs(
                "aggregate proof requires at least one blob".to_string(),
            ));
        }

        let (polynomials, commitments): (Vec<PolynomialEvalForm>, Vec<G1Affine>) = blobs
            .par_iter()
            .map(|blob| {
                let polynomial = blob.to_polynomial_eval_form()?;
                let commitment = self.commit_eval_form(&polynomial, setup)?;
                Ok((polynomial, commitment))
            })
            .collect::<Result<Vec<_>, KzgError>>()?
            .into_iter()
            .unzip();

        let (aggregated_poly, _, evaluation_challenge) =
            helpers::compute_aggregated_poly_and_commitment(&polynomials, &commitments)?;
        debug!(blobs = blobs.len(), "aggregated blob polynomials");

        let (proof, _) = self.compute_kzg_proof(&aggregated_poly, &evaluation_challenge, setup)?;
        Ok(proof)
    }
}

/// Commits to a serialized blob. Returns the compressed commitment.
pub fn blob_to_kzg_commitment(
    blob: &[u8],
    setup: &TrustedSetup,
) -> Result<[u8; SIZE_OF_G1_AFFINE_COMPRESSED], KzgError> {
    let blob = Blob::new(blob)?;
    let commitment = KZG::new().commit_blob(&blob, setup)?;
    helpers::g1_to_bytes(&commitment)
}

/// Opens a serialized blob at the canonical field element `z`. Returns the
/// compressed proof and the claimed value `y`.
pub fn compute_kzg_proof(
    blob: &[u8],
    z: &[u8; BYTES_PER_FIELD_ELEMENT],
    setup: &TrustedSetup,
) -> Result<([u8; SIZE_OF_G1_AFFINE_COMPRESSED], [u8; BYTES_PER_FIELD_ELEMENT]), KzgError> {
    let blob = Blob::new(blob)?;
    let z_fr = helpers::bytes_to_fr(z)?;
    let polynomial = blob.to_polynomial_eval_form()?;
    let (proof, y_fr) = KZG::new().compute_kzg_proof(&polynomial, &z_fr, setup)?;
    Ok((helpers::g1_to_bytes(&proof)?, helpers::fr_to_bytes_be(&y_fr)))
}

/// Computes one proof covering every serialized blob, in order.
pub fn compute_aggregate_kzg_proof(
    blobs: &[Vec<u8>],
    setup: &TrustedSetup,
) -> Result<[u8; SIZE_OF_G1_AFFINE_COMPRESSED], KzgError> {
    let blobs = blobs
        .iter()
        .map(|blob| Blob::new(blob))
        .collect::<Result<Vec<_>, _>>()?;
    let proof = KZG::new().compute_aggregate_proof(&blobs, setup)?;
    helpers::g1_to_bytes(&proof)
}
