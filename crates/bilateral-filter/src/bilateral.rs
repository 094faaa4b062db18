//! Bilateral filter instance
//!
//! A [`Bilateral`] is built once per clip. Construction validates the
//! formats, resolves per-plane parameters, selects an evaluator for each
//! processed plane and builds the weight tables. After that the instance is
//! read-only and [`Bilateral::process`] can be called from any thread.
//!
//! # Joint filtering
//!
//! When a reference clip is given, range weights are computed from the
//! reference frame instead of the source frame, so edges of the reference
//! steer the smoothing of the source.
//!
//! # Example
//!
//! ```no_run
//! use bilateral_core::{Frame, VideoFormat, VideoInfo};
//! use bilateral_filter::{Bilateral, BilateralOptions};
//!
//! let info = VideoInfo::new(VideoFormat::gray8(), 64, 48).unwrap();
//! let filter = Bilateral::new(&info, &BilateralOptions::with_sigmas(2.0, 0.05)).unwrap();
//! let frame = Frame::from_info(&info).unwrap();
//! let smoothed = filter.process(&frame, None).unwrap();
//! ```

use crate::approximate::bilateral_approximate;
use crate::direct::bilateral_direct;
use crate::dispatch::{check_filter_format, map_planes};
use crate::params::{BilateralOptions, PlaneParams};
use crate::select::{Evaluator, select_evaluator};
use crate::tables::{RangeTable, SpatialTable, WeightTables};
use crate::{FilterError, FilterResult};
use bilateral_core::{Frame, FramePlanes, Plane, Sample, VideoInfo};
use std::sync::Arc;

/// Everything needed to filter one processed plane
#[derive(Debug, Clone)]
struct PlanePlan {
    evaluator: Evaluator,
    spatial: Arc<SpatialTable>,
    range: Arc<RangeTable>,
}

/// A configured bilateral filter for one clip format
#[derive(Debug, Clone)]
pub struct Bilateral {
    info: VideoInfo,
    reference: Option<VideoInfo>,
    params: [PlaneParams; 3],
    plans: [Option<PlanePlan>; 3],
}

fn check_reference(info: &VideoInfo, reference: &VideoInfo) -> FilterResult<()> {
    let (format, ref_format) = (&info.format, &reference.format);

    check_filter_format(ref_format).map_err(|e| FilterError::ReferenceMismatch(e.to_string()))?;
    if info.width != reference.width || info.height != reference.height {
        return Err(FilterError::ReferenceMismatch(format!(
            "reference is {}x{}, input is {}x{}",
            reference.width, reference.height, info.width, info.height
        )));
    }
    if format.color_family != ref_format.color_family {
        return Err(FilterError::ReferenceMismatch(format!(
            "reference color family {:?} differs from input {:?}",
            ref_format.color_family, format.color_family
        )));
    }
    if format.sub_sampling_w != ref_format.sub_sampling_w
        || format.sub_sampling_h != ref_format.sub_sampling_h
    {
        return Err(FilterError::ReferenceMismatch(
            "reference subsampling differs from input".to_string(),
        ));
    }
    if format.bits_per_sample != ref_format.bits_per_sample {
        return Err(FilterError::ReferenceMismatch(format!(
            "reference has {} bits per sample, input has {}",
            ref_format.bits_per_sample, format.bits_per_sample
        )));
    }
    Ok(())
}

impl Bilateral {
    /// Build a self-guided filter for clips described by `info`.
    ///
    /// # Errors
    ///
    /// See [`Bilateral::with_reference`].
    pub fn new(info: &VideoInfo, options: &BilateralOptions) -> FilterResult<Self> {
        Self::with_reference(info, None, options)
    }

    /// Build a filter, optionally guided by a reference clip.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnsupportedFormat`] if the input is not 8..=16-bit integer
    /// - [`FilterError::ReferenceMismatch`] if the reference differs in size,
    ///   color family, subsampling or bit depth
    /// - any option error from [`PlaneParams::resolve_all`]
    pub fn with_reference(
        info: &VideoInfo,
        reference: Option<&VideoInfo>,
        options: &BilateralOptions,
    ) -> FilterResult<Self> {
        check_filter_format(&info.format)?;
        if let Some(reference) = reference {
            check_reference(info, reference)?;
        }

        let params = PlaneParams::resolve_all(options, &info.format)?;
        let bits = info.format.bits_per_sample;
        let mut tables = WeightTables::new();
        let mut plans: [Option<PlanePlan>; 3] = [None, None, None];

        for (i, (p, plan)) in params.iter().zip(plans.iter_mut()).enumerate() {
            if !p.processed {
                log::debug!("bilateral: plane {i} copied through");
                continue;
            }
            let evaluator = select_evaluator(p, bits);
            log::debug!(
                "bilateral: plane {i} sigma_s={} sigma_r={} algorithm={:?} -> {:?}",
                p.sigma_s,
                p.sigma_r,
                p.algorithm,
                evaluator
            );
            let (pw, ph) = info.plane_dimensions(i);
            let max_radius = pw.max(ph).saturating_sub(1) as usize;
            *plan = Some(PlanePlan {
                evaluator,
                spatial: tables.spatial(p.sigma_s, max_radius)?,
                range: tables.range(p.sigma_r, bits)?,
            });
        }

        Ok(Self {
            info: *info,
            reference: reference.copied(),
            params,
            plans,
        })
    }

    /// Clip description the filter was built for.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Whether range weights come from a reference clip.
    pub fn is_joint(&self) -> bool {
        self.reference.is_some()
    }

    /// Resolved parameters of all three plane slots.
    pub fn plane_params(&self) -> &[PlaneParams; 3] {
        &self.params
    }

    /// Evaluator selected for `plane`, `None` if the plane is copied through.
    pub fn evaluator(&self, plane: usize) -> Option<Evaluator> {
        self.plans.get(plane)?.as_ref().map(|p| p.evaluator)
    }

    /// Spatial table used for `plane`.
    pub fn spatial_table(&self, plane: usize) -> Option<&SpatialTable> {
        self.plans.get(plane)?.as_ref().map(|p| p.spatial.as_ref())
    }

    /// Range table used for `plane`.
    pub fn range_table(&self, plane: usize) -> Option<&RangeTable> {
        self.plans.get(plane)?.as_ref().map(|p| p.range.as_ref())
    }

    /// Filter one frame.
    ///
    /// `reference` must be given exactly when the filter was built with a
    /// reference clip. The input frames are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::FrameMismatch`] if a frame does not match the
    /// clip descriptions given at construction.
    pub fn process(&self, src: &Frame, reference: Option<&Frame>) -> FilterResult<Frame> {
        if src.info() != self.info {
            return Err(FilterError::FrameMismatch(format!(
                "frame is {:?}, filter expects {:?}",
                src.info(),
                self.info
            )));
        }

        let guide = match (&self.reference, reference) {
            (None, None) => src,
            (Some(expected), Some(frame)) => {
                if frame.info() != *expected {
                    return Err(FilterError::FrameMismatch(format!(
                        "reference frame is {:?}, filter expects {:?}",
                        frame.info(),
                        expected
                    )));
                }
                frame
            }
            (None, Some(_)) => {
                return Err(FilterError::FrameMismatch(
                    "reference frame given to a filter built without a reference clip"
                        .to_string(),
                ));
            }
            (Some(_), None) => {
                return Err(FilterError::FrameMismatch(
                    "filter built with a reference clip needs a reference frame".to_string(),
                ));
            }
        };

        match src.planes() {
            FramePlanes::U8(_) => self.process_typed::<u8>(src, guide),
            FramePlanes::U16(_) => self.process_typed::<u16>(src, guide),
        }
    }

    fn process_typed<T: Sample>(&self, src: &Frame, guide: &Frame) -> FilterResult<Frame> {
        let planes = map_planes(src.num_planes(), |i| {
            let src_plane = src.plane::<T>(i)?;
            let Some(plan) = &self.plans[i] else {
                return Ok(src_plane.clone());
            };

            let guide_plane = guide.plane::<T>(i)?;
            let mut dst = Plane::new(src_plane.width(), src_plane.height())?;
            log::trace!(
                "bilateral: plane {i} {}x{} via {:?}",
                src_plane.width(),
                src_plane.height(),
                plan.evaluator
            );

            match plan.evaluator {
                Evaluator::Direct => {
                    bilateral_direct(src_plane, guide_plane, &plan.spatial, &plan.range, &mut dst)?
                }
                Evaluator::Approximate { level_count } => bilateral_approximate(
                    src_plane,
                    guide_plane,
                    &plan.spatial,
                    &plan.range,
                    level_count,
                    &mut dst,
                )?,
            }
            Ok(dst)
        })?;

        Ok(Frame::from_planes(self.info.format, planes)?)
    }
}
