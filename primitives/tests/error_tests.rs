#[cfg(test)]
mod tests {
    use blob_kzg_primitives::errors::{KzgError, PolynomialError};

    #[test]
    fn test_polynomial_error_bad_args() {
        let msg = String::from("divisor is empty");
        let error = PolynomialError::BadArgs(msg.clone());
        assert_eq!(format!("{}", error), format!("bad arguments: {}", msg));
    }

    #[test]
    fn test_polynomial_error_fft() {
        let msg = String::from("test fft error");
        let error = PolynomialError::FFTError(msg.clone());
        assert_eq!(format!("{}", error), format!("FFT error: {}", msg));
    }

    #[test]
    fn test_kzg_error_from_polynomial_error() {
        let error: KzgError = PolynomialError::BadArgs(String::from("x")).into();
        assert_eq!(
            error,
            KzgError::PolynomialError(PolynomialError::BadArgs(String::from("x")))
        );
        assert_eq!(format!("{}", error), "polynomial error: bad arguments: x");
    }

    #[test]
    fn test_kzg_error_setup_format() {
        let msg = String::from("expected 65 g2 points, header declares 2");
        let error = KzgError::SetupFormatError(msg.clone());
        assert_eq!(
            format!("{}", error),
            format!("trusted setup format error: {}", msg)
        );
    }

    #[test]
    fn test_kzg_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error: KzgError = io.into();
        assert_eq!(error, KzgError::IoError(String::from("no such file")));
        assert_eq!(format!("{}", error), "io error: no such file");
    }

    #[test]
    fn test_kzg_error_not_on_curve() {
        let msg = String::from("invalid g1 point");
        let error = KzgError::NotOnCurveError(msg.clone());
        assert_eq!(
            format!("{}", error),
            format!("not on curve error: {}", msg)
        );
    }

    #[test]
    fn test_kzg_error_srs_capacity() {
        let error = KzgError::SrsCapacityExceeded {
            polynomial_len: 8192,
            srs_len: 4096,
        };
        assert_eq!(
            format!("{}", error),
            "polynomial degree 8192 exceeds SRS capacity 4096"
        );
    }

    #[test]
    fn test_kzg_error_unit_variants() {
        assert_eq!(
            format!("{}", KzgError::InvalidInputLength),
            "invalid input length"
        );
        assert_eq!(
            format!("{}", KzgError::InvalidDenominator),
            "invalid denominator"
        );
    }

    #[test]
    fn test_kzg_error_equality() {
        let error1 = KzgError::BadArgs(String::from("error"));
        let error2 = KzgError::BadArgs(String::from("error"));
        let error3 = KzgError::SerializationError(String::from("error"));
        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }
}
