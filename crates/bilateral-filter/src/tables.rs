//! Gaussian weight lookup tables
//!
//! Two 1D tables drive both bilateral evaluators:
//!
//! - [`SpatialTable`]: weight by pixel distance, `exp(-d² / (2σs²))` for
//!   `d in 0..=radius`. The 2D weight of an offset `(dx, dy)` is the product
//!   `w[|dx|] * w[|dy|]`, which equals `exp(-(dx² + dy²) / (2σs²))`.
//! - [`RangeTable`]: weight by absolute intensity difference,
//!   `exp(-(diff / peak)² / (2σr²))` for `diff in 0..=peak`, so `σr` is
//!   expressed in normalized intensity units regardless of bit depth.
//!
//! [`WeightTables`] caches tables per filter instance so that planes sharing
//! a sigma share one table.

use crate::{FilterError, FilterResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Spatial radius in units of `σs`.
///
/// Beyond `3σs` the Gaussian weight is below 1.2% of the center weight.
pub const SIGMA_S_MULTIPLIER: f64 = 3.0;

/// Widest bit depth accepted by [`RangeTable`].
pub const MAX_RANGE_BITS: u32 = 16;

/// Window radius used for a spatial standard deviation.
///
/// `max(1, ceil(3σs))`, saturating at `usize::MAX`.
pub fn spatial_radius(sigma_s: f64) -> usize {
    ((sigma_s * SIGMA_S_MULTIPLIER).ceil() as usize).max(1)
}

/// Gaussian weight `exp(-(x / σ)² / 2)`.
///
/// Divides before squaring so that a tiny `σ` yields 1 at `x = 0` and 0
/// elsewhere instead of `0 / 0`.
#[inline]
fn gaussian_weight(x: f64, sigma: f64) -> f32 {
    let t = x / sigma;
    (-0.5 * t * t).exp() as f32
}

fn validate_sigma(name: &str, sigma: f64) -> FilterResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "{name} must be positive and finite, got {sigma}"
        )));
    }
    Ok(())
}

/// Spatial Gaussian weights indexed by pixel distance
#[derive(Debug, Clone)]
pub struct SpatialTable {
    sigma: f64,
    weights: Vec<f32>,
}

impl SpatialTable {
    /// Build the table for `sigma_s` with the radius from [`spatial_radius`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `sigma_s` is
    /// positive and finite.
    pub fn new(sigma_s: f64) -> FilterResult<Self> {
        validate_sigma("sigma_s", sigma_s)?;
        Self::with_radius(sigma_s, spatial_radius(sigma_s))
    }

    /// Build the table for `sigma_s` with the radius from [`spatial_radius`]
    /// limited to `max_radius`.
    ///
    /// Taps further than `max_radius` never land inside a plane whose
    /// largest dimension is `max_radius + 1`, so the result filters such a
    /// plane exactly as the full table would. The radius stays at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `sigma_s` is
    /// positive and finite.
    pub fn with_max_radius(sigma_s: f64, max_radius: usize) -> FilterResult<Self> {
        validate_sigma("sigma_s", sigma_s)?;
        Self::with_radius(sigma_s, spatial_radius(sigma_s).min(max_radius.max(1)))
    }

    fn with_radius(sigma_s: f64, radius: usize) -> FilterResult<Self> {
        validate_sigma("sigma_s", sigma_s)?;
        let weights = (0..=radius)
            .map(|d| gaussian_weight(d as f64, sigma_s))
            .collect();
        Ok(Self {
            sigma: sigma_s,
            weights,
        })
    }

    /// Standard deviation in pixels.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Window radius in pixels.
    #[inline]
    pub fn radius(&self) -> usize {
        self.weights.len() - 1
    }

    /// Window width, `2 * radius + 1`.
    #[inline]
    pub fn window_size(&self) -> usize {
        2 * self.radius() + 1
    }

    /// Weights for distances `0..=radius`.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at distance `d`. Panics if `d > radius`.
    #[inline]
    pub fn weight(&self, d: usize) -> f32 {
        self.weights[d]
    }
}

/// Range Gaussian weights indexed by absolute intensity difference
#[derive(Debug, Clone)]
pub struct RangeTable {
    sigma: f64,
    bits_per_sample: u32,
    weights: Vec<f32>,
}

impl RangeTable {
    /// Build the table for `sigma_r` (normalized units) at the given bit depth.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `sigma_r` is
    /// positive and finite, and [`FilterError::UnsupportedFormat`] if
    /// `bits_per_sample` is outside 1..=16.
    pub fn new(sigma_r: f64, bits_per_sample: u32) -> FilterResult<Self> {
        validate_sigma("sigma_r", sigma_r)?;
        if bits_per_sample == 0 || bits_per_sample > MAX_RANGE_BITS {
            return Err(FilterError::UnsupportedFormat(format!(
                "range table needs 1..=16 bits per sample, got {bits_per_sample}"
            )));
        }

        let peak = ((1u32 << bits_per_sample) - 1) as f64;
        let weights = (0..=peak as usize)
            .map(|diff| gaussian_weight(diff as f64 / peak, sigma_r))
            .collect();

        Ok(Self {
            sigma: sigma_r,
            bits_per_sample,
            weights,
        })
    }

    /// Standard deviation in normalized intensity units.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Bit depth the table was built for.
    #[inline]
    pub fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    /// Largest sample value, `2^bits - 1`.
    #[inline]
    pub fn peak(&self) -> u32 {
        (self.weights.len() - 1) as u32
    }

    /// Weights for differences `0..=peak`.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight for an absolute difference. Panics if `diff > peak`.
    #[inline]
    pub fn weight(&self, diff: usize) -> f32 {
        self.weights[diff]
    }
}

/// Per-instance table cache keyed by sigma plus radius cap or bit depth
#[derive(Debug, Default)]
pub struct WeightTables {
    spatial: HashMap<(u64, usize), Arc<SpatialTable>>,
    range: HashMap<(u64, u32), Arc<RangeTable>>,
}

impl WeightTables {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or build the spatial table for `sigma_s`, with its radius
    /// limited to `max_radius`.
    ///
    /// # Errors
    ///
    /// Same as [`SpatialTable::with_max_radius`].
    pub fn spatial(&mut self, sigma_s: f64, max_radius: usize) -> FilterResult<Arc<SpatialTable>> {
        let max_radius = max_radius.max(1).min(spatial_radius(sigma_s));
        let key = (sigma_s.to_bits(), max_radius);
        if let Some(table) = self.spatial.get(&key) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(SpatialTable::with_max_radius(sigma_s, max_radius)?);
        self.spatial.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Get or build the range table for `sigma_r` at `bits_per_sample`.
    ///
    /// # Errors
    ///
    /// Same as [`RangeTable::new`].
    pub fn range(&mut self, sigma_r: f64, bits_per_sample: u32) -> FilterResult<Arc<RangeTable>> {
        let key = (sigma_r.to_bits(), bits_per_sample);
        if let Some(table) = self.range.get(&key) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(RangeTable::new(sigma_r, bits_per_sample)?);
        self.range.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Number of distinct spatial tables built.
    pub fn spatial_count(&self) -> usize {
        self.spatial.len()
    }

    /// Number of distinct range tables built.
    pub fn range_count(&self) -> usize {
        self.range.len()
    }
}
