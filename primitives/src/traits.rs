use ark_bls12_381::{g1, g2, Fr};
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::consts::{
    BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED,
};

#[derive(Debug, thiserror::Error)]
pub enum PointReadError {
    #[error("Invalid point data: {0}")]
    InvalidData(String),

    #[error("Deserialization failed")]
    DeserializationError,

    #[error("Serialization failed")]
    SerializationError,
}

pub type Result<T> = core::result::Result<T, PointReadError>;

/// Size of a compressed point for a BLS12-381 curve configuration.
pub trait CompressedSize {
    const COMPRESSED_SIZE: usize;
    const NAME: &'static str;
}

impl CompressedSize for g1::Config {
    const COMPRESSED_SIZE: usize = SIZE_OF_G1_AFFINE_COMPRESSED;
    const NAME: &'static str = "g1";
}

impl CompressedSize for g2::Config {
    const COMPRESSED_SIZE: usize = SIZE_OF_G2_AFFINE_COMPRESSED;
    const NAME: &'static str = "g2";
}

/// Reading and writing points in the compressed BLS12-381 encoding (big-endian
/// x coordinate, compression/infinity/sort flags in the three top bits).
///
/// Reading always validates: the bytes must carry the compression flag, the
/// x coordinate must be canonical, the point must lie on the curve and in the
/// prime-order subgroup. The point at infinity is accepted only in its single
/// canonical encoding.
pub trait ReadPointFromBytes: Sized {
    const COMPRESSED_SIZE: usize;

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self>;
    fn to_bytes_compressed(&self) -> Result<Vec<u8>>;
}

impl<P: SWCurveConfig + CompressedSize> ReadPointFromBytes for Affine<P> {
    const COMPRESSED_SIZE: usize = P::COMPRESSED_SIZE;

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != P::COMPRESSED_SIZE {
            return Err(PointReadError::InvalidData(format!(
                "expected {} bytes for a {} point, got {}",
                P::COMPRESSED_SIZE,
                P::NAME,
                bytes.len()
            )));
        }
        Self::deserialize_compressed(bytes).map_err(|_| PointReadError::DeserializationError)
    }

    fn to_bytes_compressed(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(P::COMPRESSED_SIZE);
        self.serialize_compressed(&mut bytes)
            .map_err(|_| PointReadError::SerializationError)?;
        Ok(bytes)
    }
}

// A new trait for Fr for reading from bytes in big endian format
pub trait ReadFrFromBytes: Field {
    /// Rejects anything that is not exactly 32 bytes or that encodes a value
    /// greater than or equal to the field modulus. Nothing is reduced.
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Self>;
}

// Implement ReadFrFromBytes trait for Fr
impl ReadFrFromBytes for Fr {
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Fr> {
        if bytes.len() != BYTES_PER_FIELD_ELEMENT {
            return Err(PointReadError::InvalidData(format!(
                "expected {} bytes for a field element, got {}",
                BYTES_PER_FIELD_ELEMENT,
                bytes.len()
            )));
        }
        let mut bytes_le = [0u8; BYTES_PER_FIELD_ELEMENT];
        bytes_le.copy_from_slice(bytes);
        bytes_le.reverse();
        Fr::deserialize_uncompressed(&bytes_le[..])
            .map_err(|_| PointReadError::DeserializationError)
    }
}
