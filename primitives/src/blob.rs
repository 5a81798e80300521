use ark_bls12_381::Fr;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_BLOB},
    errors::KzgError,
    helpers,
    polynomial::PolynomialEvalForm,
};

/// A blob: exactly [FIELD_ELEMENTS_PER_BLOB] canonical field elements, each
/// encoded as 32 big-endian bytes. The elements are the evaluations of the
/// blob polynomial over the roots of unity, in natural order.
///
/// A `Blob` can only be built through [Blob::new] or `TryFrom<Vec<u8>>`, so holding one means the
/// length and every element have already been validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Blob {
    /// The binary data contained within the blob.
    blob_data: Vec<u8>,
}

impl Blob {
    /// Creates a new `Blob` from the given blob_data.
    ///
    /// Fails with [KzgError::InvalidInputLength] unless the data is exactly
    /// [BYTES_PER_BLOB] long, and with [KzgError::InvalidFieldElement] if any
    /// 32-byte chunk is not strictly below the field modulus.
    pub fn new(blob_data: &[u8]) -> Result<Self, KzgError> {
        Blob::try_from(blob_data.to_vec())
    }

    /// Builds a blob from field elements. Any length other than
    /// [FIELD_ELEMENTS_PER_BLOB] is rejected.
    pub fn from_field_elements(elements: &[Fr]) -> Result<Self, KzgError> {
        if elements.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::InvalidInputLength);
        }
        let mut blob_data = Vec::with_capacity(BYTES_PER_BLOB);
        for element in elements {
            blob_data.extend_from_slice(&helpers::fr_to_bytes_be(element));
        }
        Ok(Blob { blob_data })
    }

    /// Returns the blob data
    pub fn data(&self) -> &[u8] {
        &self.blob_data
    }

    /// Returns the length of the blob data in bytes. Always [BYTES_PER_BLOB].
    pub fn len(&self) -> usize {
        self.blob_data.len()
    }

    /// Checks whether the blob data is empty. Never true for a validated blob.
    pub fn is_empty(&self) -> bool {
        self.blob_data.is_empty()
    }

    /// Decodes the field elements of the blob.
    pub fn to_field_elements(&self) -> Vec<Fr> {
        self.blob_data
            .chunks_exact(BYTES_PER_FIELD_ELEMENT)
            .map(helpers::set_bytes_canonical)
            .collect()
    }

    /// Convert the blob data to a [PolynomialEvalForm].
    pub fn to_polynomial_eval_form(&self) -> Result<PolynomialEvalForm, KzgError> {
        Ok(PolynomialEvalForm::new(self.to_field_elements())?)
    }
}

impl TryFrom<Vec<u8>> for Blob {
    type Error = KzgError;

    fn try_from(blob_data: Vec<u8>) -> Result<Self, Self::Error> {
        if blob_data.len() != BYTES_PER_BLOB {
            return Err(KzgError::InvalidInputLength);
        }
        helpers::validate_blob_data_as_canonical_field_elements(&blob_data)?;
        Ok(Blob { blob_data })
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.blob_data
    }
}
