//! Algorithm selection
//!
//! Picks, per plane, between the direct and the approximate evaluator by a
//! fixed cost model, and derives a default level count when none is given.
//! The decision depends only on the plane parameters and the bit depth.
//!
//! Cost model, in units of "multiply-adds per output pixel":
//!
//! - direct: `(2r + 1)²` window taps
//! - approximate: `n * (4 * (2r + 1) + 6)` for `n` levels, i.e. two
//!   separable blurs (numerator and normalizer, two passes each) plus the
//!   per-level weighting and blending

use crate::params::{Algorithm, MAX_LEVEL_COUNT, PlaneParams};
use crate::tables::spatial_radius;

/// Per-pixel overhead of one level besides the blurs.
const LEVEL_OVERHEAD: u64 = 6;

/// Evaluator chosen for a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluator {
    /// Direct evaluation over the full window
    Direct,
    /// Piecewise-linear approximation with `level_count` levels
    Approximate {
        /// Number of intensity levels, in `2..=256`
        level_count: usize,
    },
}

/// Default level count for a range sigma at a bit depth.
///
/// Coarser range kernels need fewer levels:
///
/// - `σr >= 0.08`: 4
/// - `0.015 <= σr < 0.08`: `min(16, round(0.32 / σr))`
/// - `σr < 0.015`: `min(32, round(0.24 / σr))`
///
/// The result is clamped to `[2, min(256, peak + 1)]`.
pub fn default_level_count(sigma_r: f64, bits_per_sample: u32) -> usize {
    let n = if sigma_r >= 0.08 {
        4
    } else if sigma_r >= 0.015 {
        ((0.32 / sigma_r).round() as usize).min(16)
    } else {
        ((0.24 / sigma_r).round() as usize).min(32)
    };

    let levels_available = if bits_per_sample >= 8 {
        MAX_LEVEL_COUNT
    } else {
        1usize << bits_per_sample
    };
    n.clamp(2, levels_available.min(MAX_LEVEL_COUNT))
}

fn window_width(radius: usize) -> u64 {
    (radius as u64).saturating_mul(2).saturating_add(1)
}

/// Estimated direct cost for a window radius, saturating at `u64::MAX`.
pub fn direct_cost(radius: usize) -> u64 {
    let window = window_width(radius);
    window.saturating_mul(window)
}

/// Estimated approximate cost for a window radius and level count,
/// saturating at `u64::MAX`.
pub fn approximate_cost(radius: usize, level_count: usize) -> u64 {
    let per_level = window_width(radius)
        .saturating_mul(4)
        .saturating_add(LEVEL_OVERHEAD);
    (level_count as u64).saturating_mul(per_level)
}

/// Resolve the evaluator for a processed plane.
///
/// Pinned algorithms are honored; `Auto` picks the approximate evaluator
/// only when it is strictly cheaper.
pub fn select_evaluator(params: &PlaneParams, bits_per_sample: u32) -> Evaluator {
    let level_count = if params.level_count == 0 {
        default_level_count(params.sigma_r, bits_per_sample)
    } else {
        params.level_count
    };

    match params.algorithm {
        Algorithm::Direct => Evaluator::Direct,
        Algorithm::Approximate => Evaluator::Approximate { level_count },
        Algorithm::Auto => {
            let radius = spatial_radius(params.sigma_s);
            if approximate_cost(radius, level_count) < direct_cost(radius) {
                Evaluator::Approximate { level_count }
            } else {
                Evaluator::Direct
            }
        }
    }
}
