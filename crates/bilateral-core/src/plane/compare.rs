//! Plane comparison operations
//!
//! - Sample equality and difference counting
//! - Mean absolute difference
//! - Maximum absolute difference

use super::Plane;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Difference statistics between two planes
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneDiffResult {
    /// Number of samples that differ
    pub n_diff: u64,
    /// Fraction of samples that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum absolute difference
    pub max_diff: u32,
    /// Mean absolute difference
    pub mean_abs_diff: f64,
}

impl<T: Sample> Plane<T> {
    /// Compute difference statistics against `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn diff_stats(&self, other: &Plane<T>) -> Result<PlaneDiffResult> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        let mut sum = 0u64;
        for (&a, &b) in self.data().iter().zip(other.data()) {
            let d = a.to_index().abs_diff(b.to_index()) as u32;
            if d != 0 {
                n_diff += 1;
                max_diff = max_diff.max(d);
                sum += u64::from(d);
            }
        }

        let total = self.len() as f64;
        Ok(PlaneDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total,
            max_diff,
            mean_abs_diff: sum as f64 / total,
        })
    }

    /// Mean absolute difference against `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn mean_abs_diff(&self, other: &Plane<T>) -> Result<f64> {
        Ok(self.diff_stats(other)?.mean_abs_diff)
    }

    /// Maximum absolute difference against `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn max_abs_diff(&self, other: &Plane<T>) -> Result<u32> {
        Ok(self.diff_stats(other)?.max_diff)
    }

    /// Mean sample value.
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data().iter().map(|&v| v.to_index() as u64).sum();
        sum as f64 / self.len() as f64
    }

    /// Minimum and maximum sample values.
    pub fn min_max(&self) -> (T, T) {
        let mut min = self.data()[0];
        let mut max = min;
        for &v in self.data() {
            if v.to_index() < min.to_index() {
                min = v;
            }
            if v.to_index() > max.to_index() {
                max = v;
            }
        }
        (min, max)
    }
}
