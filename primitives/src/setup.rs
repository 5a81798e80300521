use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use crossbeam_channel::bounded;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::{path::Path, time::Instant};
use tracing::{debug, info};

use crate::{
    consts::{FIELD_ELEMENTS_PER_BLOB, NUM_G2_POINTS},
    errors::KzgError,
    helpers,
    traits::ReadPointFromBytes,
};

/// The trusted setup (structured reference string) shared by every
/// commitment, proof and verification.
///
/// Holds `[τ^i]₁` for `i < FIELD_ELEMENTS_PER_BLOB` (monomial form), the same
/// table in Lagrange form over the blob domain, `[τ^i]₂` for
/// `i < NUM_G2_POINTS`, and the roots of unity of the blob domain.
///
/// A `TrustedSetup` is immutable once constructed and every constructor
/// validates all points, so there is no way to observe a partially loaded
/// setup. Share it across threads by reference or through an `Arc`.
///
/// # Setup file format
///
/// ```text
/// 4096                 number of G1 points
/// 65                   number of G2 points
/// <4096 lines>         compressed G1 points [τ^i]₁ as 96 hex characters
/// <65 lines>           compressed G2 points [τ^i]₂ as 192 hex characters
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TrustedSetup {
    g1_monomial: Vec<G1Affine>,
    g1_lagrange: Vec<G1Affine>,
    g2: Vec<G2Affine>,
    roots_of_unity: Vec<Fr>,
}

impl TrustedSetup {
    /// Loads a trusted setup file. The file is read in one go before any
    /// point is decoded.
    ///
    /// # Errors
    ///
    /// * [KzgError::IoError] if the file cannot be read.
    /// * [KzgError::SetupFormatError] if the header, the point counts or the
    ///   hex encoding are wrong.
    /// * [KzgError::NotOnCurveError] if any point is not a valid compressed
    ///   point of the prime-order subgroup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KzgError> {
        let start = Instant::now();
        let contents = std::fs::read_to_string(path.as_ref())?;
        let setup = Self::from_text(&contents)?;
        info!(
            path = %path.as_ref().display(),
            g1_points = setup.g1_monomial.len(),
            g2_points = setup.g2.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded trusted setup"
        );
        Ok(setup)
    }

    /// Parses a trusted setup from the contents of a setup file.
    pub fn from_text(contents: &str) -> Result<Self, KzgError> {
        let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());

        let n_g1 = parse_count(lines.next(), "g1")?;
        let n_g2 = parse_count(lines.next(), "g2")?;
        if n_g1 != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::SetupFormatError(format!(
                "expected {} g1 points, header declares {}",
                FIELD_ELEMENTS_PER_BLOB, n_g1
            )));
        }
        if n_g2 != NUM_G2_POINTS {
            return Err(KzgError::SetupFormatError(format!(
                "expected {} g2 points, header declares {}",
                NUM_G2_POINTS, n_g2
            )));
        }

        let point_lines: Vec<&str> = lines.collect();
        if point_lines.len() != n_g1 + n_g2 {
            return Err(KzgError::SetupFormatError(format!(
                "expected {} point lines, found {}",
                n_g1 + n_g2,
                point_lines.len()
            )));
        }

        let g1_encoded = decode_hex_lines::<G1Affine>(&point_lines[..n_g1], 0)?;
        let g2_encoded = decode_hex_lines::<G2Affine>(&point_lines[n_g1..], n_g1)?;
        debug!(
            g1_points = g1_encoded.len(),
            g2_points = g2_encoded.len(),
            "decoded trusted setup hex"
        );

        let g1_monomial = parallel_read_points::<G1Affine>(g1_encoded)?;
        let g2 = parallel_read_points::<G2Affine>(g2_encoded)?;
        debug!("validated trusted setup points");

        Self::from_validated_points(g1_monomial, g2)
    }

    /// Builds a trusted setup from points in monomial form, validating the
    /// counts, the generators and the subgroup membership of every point.
    pub fn new(g1_monomial: Vec<G1Affine>, g2: Vec<G2Affine>) -> Result<Self, KzgError> {
        g1_monomial
            .par_iter()
            .try_for_each(helpers::validate_g1_point)?;
        g2.par_iter().try_for_each(helpers::validate_g2_point)?;
        Self::from_validated_points(g1_monomial, g2)
    }

    fn from_validated_points(
        g1_monomial: Vec<G1Affine>,
        g2: Vec<G2Affine>,
    ) -> Result<Self, KzgError> {
        if g1_monomial.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::SetupFormatError(format!(
                "expected {} g1 points, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                g1_monomial.len()
            )));
        }
        if g2.len() != NUM_G2_POINTS {
            return Err(KzgError::SetupFormatError(format!(
                "expected {} g2 points, got {}",
                NUM_G2_POINTS,
                g2.len()
            )));
        }
        // τ^0 must be the group generator in both groups, the verifier relies on it.
        if g1_monomial[0] != G1Affine::generator() {
            return Err(KzgError::SetupFormatError(
                "first g1 point is not the generator".to_string(),
            ));
        }
        if g2[0] != G2Affine::generator() {
            return Err(KzgError::SetupFormatError(
                "first g2 point is not the generator".to_string(),
            ));
        }

        let g1_lagrange = g1_ifft(&g1_monomial)?;
        let roots_of_unity = helpers::calculate_roots_of_unity(FIELD_ELEMENTS_PER_BLOB)?;

        Ok(Self {
            g1_monomial,
            g1_lagrange,
            g2,
            roots_of_unity,
        })
    }

    /// Releases the setup. Taking `self` by value means the handle cannot be
    /// used afterwards; dropping it has the same effect.
    pub fn free(self) {
        debug!("releasing trusted setup");
        drop(self);
    }

    /// Serializes the setup in the file format accepted by [Self::from_text].
    pub fn to_text(&self) -> Result<String, KzgError> {
        let mut out = String::with_capacity(
            32 + self.g1_monomial.len() * (G1Affine::COMPRESSED_SIZE * 2 + 1)
                + self.g2.len() * (G2Affine::COMPRESSED_SIZE * 2 + 1),
        );
        out.push_str(&format!("{}\n{}\n", self.g1_monomial.len(), self.g2.len()));
        for point in &self.g1_monomial {
            out.push_str(&hex::encode(encode_point(point)?));
            out.push('\n');
        }
        for point in &self.g2 {
            out.push_str(&hex::encode(encode_point(point)?));
            out.push('\n');
        }
        Ok(out)
    }

    /// `[τ^i]₁` in monomial form, for committing to coefficient-form polynomials.
    pub fn g1_monomial(&self) -> &[G1Affine] {
        &self.g1_monomial
    }

    /// `[L_i(τ)]₁` over the blob domain, for committing to evaluation-form polynomials.
    pub fn g1_lagrange(&self) -> &[G1Affine] {
        &self.g1_lagrange
    }

    pub fn g2(&self) -> &[G2Affine] {
        &self.g2
    }

    /// `[τ]₂`.
    pub fn g2_tau(&self) -> G2Affine {
        self.g2[1]
    }

    /// The roots of unity of the blob domain, in natural order.
    pub fn roots_of_unity(&self) -> &[Fr] {
        &self.roots_of_unity
    }
}

/// Loads a trusted setup file, see [TrustedSetup::load].
pub fn load_trusted_setup<P: AsRef<Path>>(path: P) -> Result<TrustedSetup, KzgError> {
    TrustedSetup::load(path)
}

/// Releases a trusted setup, see [TrustedSetup::free].
pub fn free_trusted_setup(setup: TrustedSetup) {
    setup.free()
}

fn parse_count(line: Option<&str>, group: &str) -> Result<usize, KzgError> {
    let line = line.ok_or_else(|| {
        KzgError::SetupFormatError(format!("missing number of {} points", group))
    })?;
    line.parse::<usize>().map_err(|e| {
        KzgError::SetupFormatError(format!("invalid number of {} points {:?}: {}", group, line, e))
    })
}

fn encode_point<T: ReadPointFromBytes>(point: &T) -> Result<Vec<u8>, KzgError> {
    point
        .to_bytes_compressed()
        .map_err(|e| KzgError::SerializationError(format!("setup point: {}", e)))
}

fn decode_hex_lines<T: ReadPointFromBytes>(
    lines: &[&str],
    line_offset: usize,
) -> Result<Vec<Vec<u8>>, KzgError> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let bytes = hex::decode(line.strip_prefix("0x").unwrap_or(line)).map_err(|e| {
                KzgError::SetupFormatError(format!(
                    "invalid hex on point line {}: {}",
                    line_offset + i,
                    e
                ))
            })?;
            if bytes.len() != T::COMPRESSED_SIZE {
                return Err(KzgError::SetupFormatError(format!(
                    "point line {} holds {} bytes, expected {}",
                    line_offset + i,
                    bytes.len(),
                    T::COMPRESSED_SIZE
                )));
            }
            Ok(bytes)
        })
        .collect()
}

/// Decodes points by fanning the encodings out to one worker per cpu over a
/// bounded channel. Workers tag each result with its position and the results
/// are sorted back into file order. The first failing position wins.
fn parallel_read_points<T>(encoded: Vec<Vec<u8>>) -> Result<Vec<T>, KzgError>
where
    T: ReadPointFromBytes + Send,
{
    let expected = encoded.len();
    let (sender, receiver) = bounded::<(Vec<u8>, usize)>(1000);
    let num_workers = num_cpus::get().max(1);

    let mut all_points: Vec<(usize, Result<T, KzgError>)> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..num_workers)
            .map(|_| {
                let receiver = receiver.clone();
                scope.spawn(move || process_chunks::<T>(receiver))
            })
            .collect();
        drop(receiver);

        for (position, bytes) in encoded.into_iter().enumerate() {
            // Only fails if every worker is gone, which the joins below report.
            if sender.send((bytes, position)).is_err() {
                break;
            }
        }
        drop(sender);

        let mut all_points = Vec::with_capacity(expected);
        for worker in workers {
            match worker.join() {
                Ok(points) => all_points.extend(points),
                Err(_) => {
                    return Err(KzgError::SetupFormatError(
                        "point decoding worker panicked".to_string(),
                    ))
                },
            }
        }
        Ok(all_points)
    })?;

    if all_points.len() != expected {
        return Err(KzgError::SetupFormatError(format!(
            "Expected {} points, but got {}.",
            expected,
            all_points.len()
        )));
    }

    // Sort by original position to maintain order
    all_points.sort_by_key(|(position, _)| *position);
    all_points.into_iter().map(|(_, point)| point).collect()
}

fn process_chunks<T: ReadPointFromBytes>(
    receiver: crossbeam_channel::Receiver<(Vec<u8>, usize)>,
) -> Vec<(usize, Result<T, KzgError>)> {
    receiver
        .iter()
        .map(|(chunk, position)| {
            let point = T::read_point_from_bytes_compressed(&chunk).map_err(|e| {
                KzgError::NotOnCurveError(format!("setup point {}: {}", position, e))
            });
            (position, point)
        })
        .collect()
}

/// Transforms monomial G1 points into the Lagrange basis of the domain of the
/// same size with an inverse FFT over the group.
pub fn g1_ifft(points: &[G1Affine]) -> Result<Vec<G1Affine>, KzgError> {
    let length = points.len();
    if !length.is_power_of_two() {
        return Err(KzgError::FFTError(
            "length provided is not a power of 2".to_string(),
        ));
    }

    let points_projective: Vec<G1Projective> =
        points.par_iter().map(|&p| G1Projective::from(p)).collect();
    let ifft_result = GeneralEvaluationDomain::<Fr>::new(length)
        .ok_or(KzgError::FFTError(
            "Could not perform IFFT due to domain construction error".to_string(),
        ))?
        .ifft(&points_projective);

    Ok(G1Projective::normalize_batch(&ifft_result))
}
