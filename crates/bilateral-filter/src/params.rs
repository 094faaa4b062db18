//! Option resolution for the bilateral filter
//!
//! [`BilateralOptions`] mirrors the host's argument map: every per-plane
//! option is a list that may hold fewer than three values. Missing values
//! are filled by a broadcast rule once, at construction, producing one
//! [`PlaneParams`] per plane.
//!
//! Broadcast rules:
//!
//! - plane 0 takes the first value, or the default;
//! - a missing value repeats the previous plane's value, except that a
//!   missing `sigma_s` for plane 1 of a YUV format subsampled in both
//!   directions is reduced to `sigma_s[0] / sqrt(2^ssh * 2^ssw)`.

use crate::{FilterError, FilterResult};
use bilateral_core::VideoFormat;

/// Default spatial standard deviation (pixels) for plane 0
pub const DEFAULT_SIGMA_S: f64 = 3.0;

/// Default range standard deviation (normalized intensity)
pub const DEFAULT_SIGMA_R: f64 = 0.02;

/// Largest accepted level count
pub const MAX_LEVEL_COUNT: usize = 256;

/// Bilateral evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Pick by estimated cost
    #[default]
    Auto = 0,
    /// Direct O(window²) evaluation
    Direct = 1,
    /// Piecewise-linear approximation, O(level count)
    Approximate = 2,
}

impl TryFrom<i64> for Algorithm {
    type Error = FilterError;

    fn try_from(code: i64) -> FilterResult<Self> {
        match code {
            0 => Ok(Algorithm::Auto),
            1 => Ok(Algorithm::Direct),
            2 => Ok(Algorithm::Approximate),
            _ => Err(FilterError::InvalidAlgorithm(code)),
        }
    }
}

/// Options for the bilateral filter
///
/// Every field is a per-plane list; see the module docs for how short lists
/// are broadcast.
#[derive(Debug, Clone, Default)]
pub struct BilateralOptions {
    /// Spatial standard deviation in pixels (>= 0, 0 disables the plane)
    pub sigma_s: Vec<f64>,
    /// Range standard deviation in normalized intensity (>= 0, 0 disables the plane)
    pub sigma_r: Vec<f64>,
    /// Planes to process; empty means all planes except YUV chroma
    pub planes: Vec<i64>,
    /// Algorithm codes: 0 auto, 1 direct, 2 approximate
    pub algorithm: Vec<i64>,
    /// Level counts for the approximate evaluator: 0 auto, or 2..=256
    pub level_count: Vec<i64>,
}

impl BilateralOptions {
    /// Options with a single spatial and range sigma broadcast to all planes.
    pub fn with_sigmas(sigma_s: f64, sigma_r: f64) -> Self {
        Self {
            sigma_s: vec![sigma_s],
            sigma_r: vec![sigma_r],
            ..Self::default()
        }
    }
}

/// Resolved parameters for one plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneParams {
    /// Spatial standard deviation in pixels
    pub sigma_s: f64,
    /// Range standard deviation in normalized intensity
    pub sigma_r: f64,
    /// Requested strategy
    pub algorithm: Algorithm,
    /// Requested level count, 0 for automatic
    pub level_count: usize,
    /// Whether the plane is filtered or copied through
    pub processed: bool,
}

/// Fill three slots from a possibly short list.
///
/// `plane1_default` computes plane 1's value from plane 0's when the list
/// has fewer than two entries.
pub(crate) fn broadcast<T: Copy>(
    values: &[T],
    default: T,
    plane1_default: impl Fn(T) -> T,
) -> [T; 3] {
    let p0 = values.first().copied().unwrap_or(default);
    let p1 = values.get(1).copied().unwrap_or_else(|| plane1_default(p0));
    let p2 = values.get(2).copied().unwrap_or(p1);
    [p0, p1, p2]
}

fn check_non_negative(name: &str, values: &[f64; 3]) -> FilterResult<()> {
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() || v < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "{name}[{i}] must be a non-negative number, got {v}"
            )));
        }
    }
    Ok(())
}

/// Resolve which planes are processed.
///
/// # Errors
///
/// Returns [`FilterError::PlaneOutOfRange`] or [`FilterError::DuplicatePlane`].
pub(crate) fn resolve_planes(planes: &[i64], format: &VideoFormat) -> FilterResult<[bool; 3]> {
    let n = format.num_planes();
    let mut process = [false; 3];

    if planes.is_empty() {
        for (i, p) in process.iter_mut().enumerate().take(n) {
            *p = !(i > 0 && format.is_yuv());
        }
        return Ok(process);
    }

    for &index in planes {
        if index < 0 || index >= n as i64 {
            return Err(FilterError::PlaneOutOfRange {
                index,
                num_planes: n,
            });
        }
        let i = index as usize;
        if process[i] {
            return Err(FilterError::DuplicatePlane(i));
        }
        process[i] = true;
    }
    Ok(process)
}

impl PlaneParams {
    /// Resolve options into per-plane parameters for `format`.
    ///
    /// Planes whose `sigma_s` or `sigma_r` is exactly 0 are marked
    /// unprocessed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for negative sigmas, bad plane indices,
    /// algorithm codes outside 0..=2 and level counts outside {0} ∪ 2..=256.
    pub fn resolve_all(options: &BilateralOptions, format: &VideoFormat) -> FilterResult<[Self; 3]> {
        let chroma_divisor = if format.is_yuv() && format.is_subsampled_both() {
            (((1u32 << format.sub_sampling_h) * (1u32 << format.sub_sampling_w)) as f64).sqrt()
        } else {
            1.0
        };
        let sigma_s = broadcast(&options.sigma_s, DEFAULT_SIGMA_S, |s0| s0 / chroma_divisor);
        check_non_negative("sigma_s", &sigma_s)?;

        let sigma_r = broadcast(&options.sigma_r, DEFAULT_SIGMA_R, |r0| r0);
        check_non_negative("sigma_r", &sigma_r)?;

        let mut processed = resolve_planes(&options.planes, format)?;
        for i in 0..3 {
            if sigma_s[i] == 0.0 || sigma_r[i] == 0.0 {
                if processed[i] && !options.planes.is_empty() {
                    log::warn!("plane {i} requested but disabled by a zero sigma");
                }
                processed[i] = false;
            }
        }

        let algorithm_codes = broadcast(&options.algorithm, 0, |a0| a0);
        let mut algorithm = [Algorithm::Auto; 3];
        for (slot, &code) in algorithm.iter_mut().zip(&algorithm_codes) {
            *slot = Algorithm::try_from(code)?;
        }

        let level_codes = broadcast(&options.level_count, 0, |l0| l0);
        let mut level_count = [0usize; 3];
        for (slot, &code) in level_count.iter_mut().zip(&level_codes) {
            if code < 0 || code == 1 || code > MAX_LEVEL_COUNT as i64 {
                return Err(FilterError::InvalidLevelCount(code));
            }
            *slot = code as usize;
        }

        Ok(std::array::from_fn(|i| PlaneParams {
            sigma_s: sigma_s[i],
            sigma_r: sigma_r[i],
            algorithm: algorithm[i],
            level_count: level_count[i],
            processed: processed[i],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilateral_core::ColorFamily;

    #[test]
    fn test_defaults_gray() {
        let params = PlaneParams::resolve_all(&BilateralOptions::default(), &VideoFormat::gray8())
            .unwrap();
        assert_eq!(params[0].sigma_s, DEFAULT_SIGMA_S);
        assert_eq!(params[0].sigma_r, DEFAULT_SIGMA_R);
        assert_eq!(params[0].algorithm, Algorithm::Auto);
        assert_eq!(params[0].level_count, 0);
        assert!(params[0].processed);
        // Planes beyond the format are never processed
        assert!(!params[1].processed);
        assert!(!params[2].processed);
    }

    #[test]
    fn test_defaults_yuv_skip_chroma() {
        let params =
            PlaneParams::resolve_all(&BilateralOptions::default(), &VideoFormat::yuv444p8())
                .unwrap();
        assert!(params[0].processed);
        assert!(!params[1].processed);
        assert!(!params[2].processed);
    }

    #[test]
    fn test_defaults_rgb_all_planes() {
        let params =
            PlaneParams::resolve_all(&BilateralOptions::default(), &VideoFormat::rgb24()).unwrap();
        assert!(params.iter().all(|p| p.processed));
        assert!(params.iter().all(|p| p.sigma_s == DEFAULT_SIGMA_S));
    }

    #[test]
    fn test_chroma_sigma_reduced_for_subsampled_yuv() {
        let params =
            PlaneParams::resolve_all(&BilateralOptions::default(), &VideoFormat::yuv420p8())
                .unwrap();
        // sqrt(2 * 2) = 2
        assert!((params[1].sigma_s - 1.5).abs() < 1e-12);
        assert!((params[2].sigma_s - 1.5).abs() < 1e-12);

        // 4:2:2 is only subsampled horizontally: no reduction
        let params =
            PlaneParams::resolve_all(&BilateralOptions::default(), &VideoFormat::yuv422p8())
                .unwrap();
        assert_eq!(params[1].sigma_s, DEFAULT_SIGMA_S);
    }

    #[test]
    fn test_explicit_values_broadcast_last() {
        let options = BilateralOptions {
            sigma_s: vec![2.0, 1.0],
            sigma_r: vec![0.1],
            algorithm: vec![1, 2],
            level_count: vec![8],
            planes: vec![0, 1, 2],
        };
        let params = PlaneParams::resolve_all(&options, &VideoFormat::yuv420p8()).unwrap();
        assert_eq!(params[2].sigma_s, 1.0);
        assert_eq!(params[2].sigma_r, 0.1);
        assert_eq!(params[0].algorithm, Algorithm::Direct);
        assert_eq!(params[2].algorithm, Algorithm::Approximate);
        assert_eq!(params[2].level_count, 8);
        assert!(params.iter().all(|p| p.processed));
    }

    #[test]
    fn test_zero_sigma_disables_plane() {
        let options = BilateralOptions {
            sigma_s: vec![3.0, 0.0, 2.0],
            sigma_r: vec![0.02, 0.02, 0.0],
            ..BilateralOptions::default()
        };
        let params = PlaneParams::resolve_all(&options, &VideoFormat::rgb24()).unwrap();
        assert!(params[0].processed);
        assert!(!params[1].processed);
        assert!(!params[2].processed);
    }

    #[test]
    fn test_negative_sigma_rejected() {
        let options = BilateralOptions::with_sigmas(-1.0, 0.02);
        assert!(PlaneParams::resolve_all(&options, &VideoFormat::gray8()).is_err());
        let options = BilateralOptions::with_sigmas(1.0, -0.02);
        assert!(PlaneParams::resolve_all(&options, &VideoFormat::gray8()).is_err());
        let options = BilateralOptions::with_sigmas(f64::NAN, 0.02);
        assert!(PlaneParams::resolve_all(&options, &VideoFormat::gray8()).is_err());
    }

    #[test]
    fn test_plane_list_errors() {
        let fmt = VideoFormat::yuv420p8();
        let out_of_range = BilateralOptions {
            planes: vec![3],
            ..BilateralOptions::default()
        };
        assert!(matches!(
            PlaneParams::resolve_all(&out_of_range, &fmt),
            Err(FilterError::PlaneOutOfRange { index: 3, .. })
        ));

        let negative = BilateralOptions {
            planes: vec![-1],
            ..BilateralOptions::default()
        };
        assert!(PlaneParams::resolve_all(&negative, &fmt).is_err());

        let duplicate = BilateralOptions {
            planes: vec![0, 2, 0],
            ..BilateralOptions::default()
        };
        assert!(matches!(
            PlaneParams::resolve_all(&duplicate, &fmt),
            Err(FilterError::DuplicatePlane(0))
        ));

        let gray = VideoFormat::integer_format(ColorFamily::Gray, 8, 0, 0).unwrap();
        let chroma_on_gray = BilateralOptions {
            planes: vec![1],
            ..BilateralOptions::default()
        };
        assert!(PlaneParams::resolve_all(&chroma_on_gray, &gray).is_err());
    }

    #[test]
    fn test_algorithm_codes() {
        assert_eq!(Algorithm::try_from(0).unwrap(), Algorithm::Auto);
        assert_eq!(Algorithm::try_from(1).unwrap(), Algorithm::Direct);
        assert_eq!(Algorithm::try_from(2).unwrap(), Algorithm::Approximate);
        assert!(matches!(
            Algorithm::try_from(3),
            Err(FilterError::InvalidAlgorithm(3))
        ));
        assert!(Algorithm::try_from(-1).is_err());
    }

    #[test]
    fn test_level_count_validation() {
        for bad in [-1i64, 1, 257] {
            let options = BilateralOptions {
                level_count: vec![bad],
                ..BilateralOptions::default()
            };
            assert!(matches!(
                PlaneParams::resolve_all(&options, &VideoFormat::gray8()),
                Err(FilterError::InvalidLevelCount(v)) if v == bad
            ));
        }
        for good in [0i64, 2, 256] {
            let options = BilateralOptions {
                level_count: vec![good],
                ..BilateralOptions::default()
            };
            assert!(PlaneParams::resolve_all(&options, &VideoFormat::gray8()).is_ok());
        }
    }

    #[test]
    fn test_broadcast_helper() {
        assert_eq!(broadcast(&[], 5, |v| v * 2), [5, 10, 10]);
        assert_eq!(broadcast(&[1], 5, |v| v * 2), [1, 2, 2]);
        assert_eq!(broadcast(&[1, 7], 5, |v| v * 2), [1, 7, 7]);
        assert_eq!(broadcast(&[1, 7, 9, 11], 5, |v| v * 2), [1, 7, 9]);
    }
}
