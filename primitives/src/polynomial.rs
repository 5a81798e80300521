use ark_bls12_381::Fr;
use ark_ff::Field;
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use ark_std::Zero;

use crate::{errors::PolynomialError, helpers};

/// Length of the quotient produced by dividing a polynomial with
/// `len_dividend` coefficients by one with `len_divisor` coefficients.
/// Callers use it to size the output buffer handed to [poly_long_div].
/// Returns `None` when the divisor is longer than the dividend.
pub fn poly_long_div_length(len_dividend: usize, len_divisor: usize) -> Option<usize> {
    len_dividend
        .checked_sub(len_divisor)
        .map(|difference| difference + 1)
}

/// Schoolbook long division `dividend / divisor` in the scalar field.
///
/// Coefficients are stored lowest degree first. `quotient` must be exactly
/// [poly_long_div_length] long; a mismatch, an empty divisor, a divisor
/// longer than the dividend or a zero leading divisor coefficient is reported
/// as [PolynomialError::BadArgs] before any work is done.
///
/// The divisor is not assumed to be monic: the inverse of its leading
/// coefficient is applied at every step. The remainder is discarded; see
/// [PolynomialCoeffForm::long_div_with_remainder] to keep it.
pub fn poly_long_div(
    quotient: &mut [Fr],
    dividend: &[Fr],
    divisor: &[Fr],
) -> Result<(), PolynomialError> {
    poly_long_div_impl(quotient, dividend, divisor).map(|_| ())
}

/// Returns the final remainder window, `divisor.len() - 1` coefficients.
fn poly_long_div_impl(
    quotient: &mut [Fr],
    dividend: &[Fr],
    divisor: &[Fr],
) -> Result<Vec<Fr>, PolynomialError> {
    if divisor.is_empty() {
        return Err(PolynomialError::BadArgs("divisor is empty".to_string()));
    }
    let expected_len = poly_long_div_length(dividend.len(), divisor.len()).ok_or_else(|| {
        PolynomialError::BadArgs(format!(
            "divisor length {} exceeds dividend length {}",
            divisor.len(),
            dividend.len()
        ))
    })?;
    if quotient.len() != expected_len {
        return Err(PolynomialError::BadArgs(format!(
            "quotient buffer has length {}, expected {}",
            quotient.len(),
            expected_len
        )));
    }

    let b_pos = divisor.len() - 1;
    let leading_divisor_inverse = divisor[b_pos].inverse().ok_or_else(|| {
        PolynomialError::BadArgs("leading coefficient of divisor is zero".to_string())
    })?;

    // Running remainder, consumed from the top.
    let mut a = dividend.to_vec();
    let mut a_pos = dividend.len() - 1;
    let mut diff = a_pos - b_pos;

    loop {
        let factor = a[a_pos] * leading_divisor_inverse;
        quotient[diff] = factor;
        for (i, divisor_coeff) in divisor.iter().enumerate() {
            // a[diff + i] -= b[i] * quot
            a[diff + i] -= factor * divisor_coeff;
        }
        if diff == 0 {
            break;
        }
        diff -= 1;
        a_pos -= 1;
    }

    a.truncate(b_pos);
    Ok(a)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialEvalForm {
    /// Evaluations of the polynomial over the roots of unity of order
    /// `evaluations.len()`, in natural order. The length is always a power of
    /// two.
    evaluations: Vec<Fr>,
}

impl PolynomialEvalForm {
    /// Creates a new [PolynomialEvalForm] from evaluations over the roots of
    /// unity. Unlike coefficients, evaluations cannot be zero-padded without
    /// changing the polynomial, so the length must already be a non-zero power
    /// of two. Typically a [crate::blob::Blob] would be converted instead,
    /// using [crate::blob::Blob::to_polynomial_eval_form].
    pub fn new(evals: Vec<Fr>) -> Result<Self, PolynomialError> {
        if !evals.len().is_power_of_two() {
            return Err(PolynomialError::BadArgs(format!(
                "number of evaluations must be a power of two, got {}",
                evals.len()
            )));
        }
        Ok(Self { evaluations: evals })
    }

    pub fn evaluations(&self) -> &[Fr] {
        &self.evaluations
    }

    /// Returns the number of evaluations, i.e. the size of the domain.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Retrieves a reference to the evaluation at the `i`-th root of unity.
    pub fn get_evaluation(&self, i: usize) -> Option<&Fr> {
        self.evaluations.get(i)
    }

    /// Always false, since the length is a power of two.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Converts all `Fr` elements in the polynomial to a single big-endian byte vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        helpers::to_byte_array(&self.evaluations)
    }

    /// Converts the polynomial to coefficient form. This is done by performing
    /// an IFFT on the evaluations.
    pub fn to_coeff_form(&self) -> Result<PolynomialCoeffForm, PolynomialError> {
        let coeffs = GeneralEvaluationDomain::<Fr>::new(self.len())
            .ok_or(PolynomialError::FFTError(
                "Failed to construct domain for IFFT".to_string(),
            ))?
            .ifft(&self.evaluations);
        Ok(PolynomialCoeffForm::new(coeffs))
    }

    /// Random linear combination `Σ scalars[j] · polys[j]`, computed pointwise.
    /// All polynomials must share one domain size.
    pub fn linear_combination(
        polys: &[PolynomialEvalForm],
        scalars: &[Fr],
    ) -> Result<PolynomialEvalForm, PolynomialError> {
        if polys.is_empty() || polys.len() != scalars.len() {
            return Err(PolynomialError::BadArgs(format!(
                "cannot combine {} polynomials with {} scalars",
                polys.len(),
                scalars.len()
            )));
        }
        let width = polys[0].len();
        if polys.iter().any(|p| p.len() != width) {
            return Err(PolynomialError::BadArgs(
                "polynomials are over different domains".to_string(),
            ));
        }

        let mut evaluations = vec![Fr::zero(); width];
        for (poly, scalar) in polys.iter().zip(scalars) {
            for (acc, eval) in evaluations.iter_mut().zip(poly.evaluations()) {
                *acc += *scalar * eval;
            }
        }
        Ok(PolynomialEvalForm { evaluations })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialCoeffForm {
    /// Coefficients, lowest degree first. Stored exactly as given: trailing
    /// zeros are kept, and nothing is padded.
    coeffs: Vec<Fr>,
}

impl PolynomialCoeffForm {
    pub fn new(coeffs: Vec<Fr>) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[Fr] {
        &self.coeffs
    }

    /// Returns the number of stored coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn get_at_index(&self, i: usize) -> Option<&Fr> {
        self.coeffs.get(i)
    }

    /// Checks if the polynomial has no elements.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial, ignoring trailing zero coefficients. `None`
    /// for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| !c.is_zero())
    }

    /// Converts all `Fr` elements in the `Polynomial` to a single byte vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        helpers::to_byte_array(&self.coeffs)
    }

    /// Horner evaluation at `point`.
    pub fn evaluate(&self, point: &Fr) -> Fr {
        self.coeffs
            .iter()
            .rev()
            .fold(Fr::zero(), |acc, coeff| acc * point + coeff)
    }

    /// Returns `self - constant`, i.e. subtracts from the degree-0 coefficient.
    pub fn sub_constant(&self, constant: &Fr) -> PolynomialCoeffForm {
        let mut coeffs = self.coeffs.clone();
        match coeffs.first_mut() {
            Some(c0) => *c0 -= constant,
            None => coeffs.push(-*constant),
        }
        PolynomialCoeffForm { coeffs }
    }

    /// Schoolbook product.
    pub fn mul(&self, other: &PolynomialCoeffForm) -> PolynomialCoeffForm {
        if self.is_empty() || other.is_empty() {
            return PolynomialCoeffForm::new(vec![]);
        }
        let mut coeffs = vec![Fr::zero(); self.len() + other.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += *a * b;
            }
        }
        PolynomialCoeffForm { coeffs }
    }

    /// Coefficient-wise sum; the result has the length of the longer operand.
    pub fn add(&self, other: &PolynomialCoeffForm) -> PolynomialCoeffForm {
        let (long, short) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut coeffs = long.coeffs.clone();
        for (acc, c) in coeffs.iter_mut().zip(&short.coeffs) {
            *acc += c;
        }
        PolynomialCoeffForm { coeffs }
    }

    /// Quotient of `self / divisor`, see [poly_long_div].
    pub fn long_div(
        &self,
        divisor: &PolynomialCoeffForm,
    ) -> Result<PolynomialCoeffForm, PolynomialError> {
        self.long_div_with_remainder(divisor).map(|(q, _)| q)
    }

    /// Quotient and remainder of `self / divisor`. The remainder has
    /// `divisor.len() - 1` coefficients.
    pub fn long_div_with_remainder(
        &self,
        divisor: &PolynomialCoeffForm,
    ) -> Result<(PolynomialCoeffForm, PolynomialCoeffForm), PolynomialError> {
        let quotient_len = poly_long_div_length(self.coeffs.len(), divisor.coeffs.len())
            .filter(|_| !divisor.is_empty())
            .ok_or_else(|| {
                PolynomialError::BadArgs(format!(
                    "cannot divide a polynomial of length {} by one of length {}",
                    self.len(),
                    divisor.len()
                ))
            })?;
        let mut quotient = vec![Fr::zero(); quotient_len];
        let remainder = poly_long_div_impl(&mut quotient, &self.coeffs, &divisor.coeffs)?;
        Ok((
            PolynomialCoeffForm::new(quotient),
            PolynomialCoeffForm::new(remainder),
        ))
    }

    /// Converts the polynomial to evaluation form. This is done by performing
    /// an FFT on the coefficients, zero-padded to the next power of two.
    pub fn to_eval_form(&self) -> Result<PolynomialEvalForm, PolynomialError> {
        let domain = GeneralEvaluationDomain::<Fr>::new(self.len()).ok_or(
            PolynomialError::FFTError("Failed to construct domain for FFT".to_string()),
        )?;
        let mut coeffs = self.coeffs.clone();
        coeffs.resize(self.len().next_power_of_two(), Fr::zero());
        let evals = domain.fft(&coeffs);
        PolynomialEvalForm::new(evals)
    }
}
