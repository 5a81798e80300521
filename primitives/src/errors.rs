use thiserror::Error;

/// Errors related to Polynomial operations.
///
/// The `PolynomialError` enum encapsulates all possible errors that can occur
/// during operations on the polynomial types, such as long division and FFT
/// transformations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PolynomialError {
    /// A precondition on the inputs was violated: mismatched buffer lengths,
    /// an empty or oversized divisor, or a zero leading divisor coefficient.
    #[error("bad arguments: {0}")]
    BadArgs(String),

    /// Error related to Fast Fourier Transform (FFT) operations with a descriptive message.
    #[error("FFT error: {0}")]
    FFTError(String),
}

/// Errors related to KZG operations.
///
/// Every variant describes malformed input or a violated precondition. A
/// well-formed proof that fails the pairing check is not an error: verifiers
/// report it as `Ok(false)`, and callers must keep the two cases apart.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum KzgError {
    /// Wraps errors originating from Polynomial operations.
    #[error("polynomial error: {0}")]
    PolynomialError(#[from] PolynomialError),

    /// A generic precondition violation, e.g. an empty aggregate input or
    /// arrays of different lengths.
    #[error("bad arguments: {0}")]
    BadArgs(String),

    #[error("MSM error: {0}")]
    MsmError(String),

    /// Error related to serialization with a descriptive message.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Error when polynomial degree exceeds SRS capacity
    #[error("polynomial degree {polynomial_len} exceeds SRS capacity {srs_len}")]
    SrsCapacityExceeded {
        polynomial_len: usize,
        srs_len: usize,
    },

    /// A curve point failed decompression, curve membership or subgroup
    /// membership.
    #[error("not on curve error: {0}")]
    NotOnCurveError(String),

    /// The trusted setup source is structurally malformed (header, point
    /// counts, hex encoding).
    #[error("trusted setup format error: {0}")]
    SetupFormatError(String),

    /// Reading the trusted setup failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Error related to Fast Fourier Transform (FFT) operations with a descriptive message.
    #[error("FFT error: {0}")]
    FFTError(String),

    /// Error indicating an invalid denominator scenario, typically in mathematical operations.
    #[error("invalid denominator")]
    InvalidDenominator,

    /// Error indicating an invalid input length scenario, typically in data processing.
    #[error("invalid input length")]
    InvalidInputLength,

    /// Error indicating invalid field element bytes that exceed the field modulus.
    #[error("invalid field element: {0}")]
    InvalidFieldElement(String),
}

impl From<std::io::Error> for KzgError {
    fn from(err: std::io::Error) -> Self {
        KzgError::IoError(err.to_string())
    }
}
