pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const SIZE_OF_G1_AFFINE_COMPRESSED: usize = 48; // in bytes
pub const SIZE_OF_G2_AFFINE_COMPRESSED: usize = 96; // in bytes

/// Number of field elements in a blob. Blobs are evaluations over the
/// `FIELD_ELEMENTS_PER_BLOB`-th roots of unity, so this must stay a power of two.
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// Number of G2 points carried by a trusted setup file, `[τ^0]₂ ..= [τ^64]₂`.
/// Only the first two are used for verification.
pub const NUM_G2_POINTS: usize = 65;

pub const FIAT_SHAMIR_PROTOCOL_DOMAIN: &[u8] = b"FSBLOBVERIFY_V1_";
