//! Separable Gaussian blur
//!
//! Companion to the bilateral filter with no range term: each plane is
//! blurred with a horizontal and a vertical Gaussian whose standard
//! deviations are configured separately. Borders use the same
//! omit-and-renormalize policy as the bilateral evaluators.
//!
//! # Option broadcasting
//!
//! - `sigma` fills like the bilateral `sigma_s`, except that plane 1 of a
//!   YUV format defaults to `sigma[0] / 2^sub_sampling_w`.
//! - An empty `sigma_v` copies `sigma`, rescaled for YUV chroma from
//!   horizontal to vertical subsampling: `sigma[i] * 2^ssw / 2^ssh`.
//! - A non-empty `sigma_v` is broadcast, with plane 1 of YUV defaulting to
//!   `sigma_v[0] / 2^sub_sampling_h`.
//!
//! A plane is blurred when either sigma is positive; an axis whose sigma
//! is 0 is left untouched.

use crate::blur::blur_separable;
use crate::dispatch::{check_filter_format, map_planes};
use crate::params::broadcast;
use crate::tables::{SpatialTable, WeightTables};
use crate::{FilterError, FilterResult};
use bilateral_core::{Frame, FramePlanes, Plane, Sample, VideoInfo};
use std::sync::Arc;

/// Default standard deviation in pixels
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Options for the Gaussian filter
#[derive(Debug, Clone, Default)]
pub struct GaussianOptions {
    /// Horizontal standard deviation per plane (>= 0)
    pub sigma: Vec<f64>,
    /// Vertical standard deviation per plane (>= 0); empty follows `sigma`
    pub sigma_v: Vec<f64>,
}

impl GaussianOptions {
    /// Same standard deviation on both axes of every plane.
    pub fn with_sigma(sigma: f64) -> Self {
        Self {
            sigma: vec![sigma],
            sigma_v: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct AxisTables {
    horizontal: Option<Arc<SpatialTable>>,
    vertical: Option<Arc<SpatialTable>>,
}

/// A configured Gaussian blur for one clip format
#[derive(Debug, Clone)]
pub struct Gaussian {
    info: VideoInfo,
    sigmas: [(f64, f64); 3],
    tables: [Option<AxisTables>; 3],
}

fn check_sigmas(name: &str, values: &[f64; 3]) -> FilterResult<()> {
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() || v < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "{name}[{i}] must be a non-negative number, got {v}"
            )));
        }
    }
    Ok(())
}

impl Gaussian {
    /// Build a Gaussian blur for clips described by `info`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedFormat`] for formats other than
    /// 8..=16-bit integer and [`FilterError::InvalidParameters`] for
    /// negative or non-finite sigmas.
    pub fn new(info: &VideoInfo, options: &GaussianOptions) -> FilterResult<Self> {
        let format = info.format;
        check_filter_format(&format)?;

        let (ssw, ssh) = if format.is_yuv() {
            (
                (1u32 << format.sub_sampling_w) as f64,
                (1u32 << format.sub_sampling_h) as f64,
            )
        } else {
            (1.0, 1.0)
        };

        let sigma = broadcast(&options.sigma, DEFAULT_SIGMA, |s0| s0 / ssw);
        check_sigmas("sigma", &sigma)?;

        let sigma_v = if options.sigma_v.is_empty() {
            std::array::from_fn(|i| {
                if i > 0 {
                    sigma[i] * ssw / ssh
                } else {
                    sigma[i]
                }
            })
        } else {
            broadcast(&options.sigma_v, DEFAULT_SIGMA, |v0| v0 / ssh)
        };
        check_sigmas("sigma_v", &sigma_v)?;

        let mut cache = WeightTables::new();
        let mut tables: [Option<AxisTables>; 3] = [None, None, None];
        let mut sigmas = [(0.0, 0.0); 3];
        for i in 0..format.num_planes() {
            let (h, v) = (sigma[i], sigma_v[i]);
            sigmas[i] = (h, v);
            if h == 0.0 && v == 0.0 {
                log::debug!("gaussian: plane {i} copied through");
                continue;
            }
            log::debug!("gaussian: plane {i} sigma={h} sigma_v={v}");
            let (pw, ph) = info.plane_dimensions(i);
            tables[i] = Some(AxisTables {
                horizontal: if h > 0.0 {
                    Some(cache.spatial(h, pw.saturating_sub(1) as usize)?)
                } else {
                    None
                },
                vertical: if v > 0.0 {
                    Some(cache.spatial(v, ph.saturating_sub(1) as usize)?)
                } else {
                    None
                },
            });
        }

        Ok(Self {
            info: *info,
            sigmas,
            tables,
        })
    }

    /// Clip description the filter was built for.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Resolved `(horizontal, vertical)` standard deviations of `plane`.
    pub fn sigmas(&self, plane: usize) -> Option<(f64, f64)> {
        self.sigmas.get(plane).copied()
    }

    /// Whether `plane` is blurred.
    pub fn is_processed(&self, plane: usize) -> bool {
        matches!(self.tables.get(plane), Some(Some(_)))
    }

    /// Blur one frame.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::FrameMismatch`] if the frame does not match
    /// the clip description.
    pub fn process(&self, src: &Frame) -> FilterResult<Frame> {
        if src.info() != self.info {
            return Err(FilterError::FrameMismatch(format!(
                "frame is {:?}, filter expects {:?}",
                src.info(),
                self.info
            )));
        }
        match src.planes() {
            FramePlanes::U8(_) => self.process_typed::<u8>(src),
            FramePlanes::U16(_) => self.process_typed::<u16>(src),
        }
    }

    fn process_typed<T: Sample>(&self, src: &Frame) -> FilterResult<Frame> {
        let peak = self.info.format.peak();
        let planes = map_planes(src.num_planes(), |i| {
            let src_plane = src.plane::<T>(i)?;
            let Some(axes) = &self.tables[i] else {
                return Ok(src_plane.clone());
            };
            log::trace!(
                "gaussian: plane {i} {}x{}",
                src_plane.width(),
                src_plane.height()
            );
            let mut dst = Plane::new(src_plane.width(), src_plane.height())?;
            gaussian_blur_plane(
                src_plane,
                axes.horizontal.as_deref(),
                axes.vertical.as_deref(),
                peak,
                &mut dst,
            )?;
            Ok(dst)
        })?;

        Ok(Frame::from_planes(self.info.format, planes)?)
    }
}

/// Blur `src` into `dst` with optional horizontal and vertical kernels.
///
/// A `None` kernel leaves that axis unblurred. Results are rounded and
/// clamped to `[0, peak]`.
///
/// # Errors
///
/// Returns [`FilterError::FrameMismatch`] if `src` and `dst` differ in size.
pub fn gaussian_blur_plane<T: Sample>(
    src: &Plane<T>,
    horizontal: Option<&SpatialTable>,
    vertical: Option<&SpatialTable>,
    peak: u32,
    dst: &mut Plane<T>,
) -> FilterResult<()> {
    if !src.sizes_equal(dst) {
        return Err(FilterError::FrameMismatch(format!(
            "destination plane is {}x{}, source plane is {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        )));
    }

    let w = src.width() as usize;
    let h = src.height() as usize;
    let mut data: Vec<f32> = src.data().iter().map(|v| v.to_f32()).collect();
    let mut scratch = vec![0.0f32; data.len()];
    let kernel_x = horizontal.map_or(&[][..], SpatialTable::weights);
    let kernel_y = vertical.map_or(&[][..], SpatialTable::weights);
    blur_separable(&mut data, &mut scratch, w, h, kernel_x, kernel_y);

    for (out, &v) in dst.data_mut().iter_mut().zip(&data) {
        *out = T::from_f32_clamped(v, peak);
    }
    Ok(())
}
