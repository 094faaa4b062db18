//! Plane dispatch
//!
//! Checks that a format can be filtered and runs a per-plane closure over
//! every plane of a frame, in parallel with the `multithreading` feature.

use crate::{FilterError, FilterResult};
use bilateral_core::{SampleType, VideoFormat};

/// Smallest bit depth the filters accept.
pub const MIN_BITS_PER_SAMPLE: u32 = 8;

/// Largest bit depth the filters accept.
pub const MAX_BITS_PER_SAMPLE: u32 = 16;

/// Check that `format` is integer, 1 or 2 bytes per sample and 8..=16 bits.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedFormat`] otherwise.
pub fn check_filter_format(format: &VideoFormat) -> FilterResult<()> {
    if format.sample_type != SampleType::Integer {
        return Err(FilterError::UnsupportedFormat(
            "only integer samples are supported".to_string(),
        ));
    }
    let bytes = format.bytes_per_sample();
    if bytes != 1 && bytes != 2 {
        return Err(FilterError::UnsupportedFormat(format!(
            "{bytes} bytes per sample is not supported"
        )));
    }
    if !(MIN_BITS_PER_SAMPLE..=MAX_BITS_PER_SAMPLE).contains(&format.bits_per_sample) {
        return Err(FilterError::UnsupportedFormat(format!(
            "{} bits per sample is outside {MIN_BITS_PER_SAMPLE}..={MAX_BITS_PER_SAMPLE}",
            format.bits_per_sample
        )));
    }
    Ok(())
}

/// Evaluate `f` for planes `0..count` and collect the results in order.
#[cfg(feature = "multithreading")]
pub(crate) fn map_planes<T, F>(count: usize, f: F) -> FilterResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> FilterResult<T> + Send + Sync,
{
    use rayon::iter::{IntoParallelIterator, ParallelIterator};

    (0..count).into_par_iter().map(f).collect()
}

/// Evaluate `f` for planes `0..count` and collect the results in order.
#[cfg(not(feature = "multithreading"))]
pub(crate) fn map_planes<T, F>(count: usize, f: F) -> FilterResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> FilterResult<T> + Send + Sync,
{
    (0..count).map(f).collect()
}
