//! Synthetic test planes
//!
//! Sample values are given as `u32` and clamped to `[0, peak]`, so the
//! same generator serves 8-bit and 16-bit planes.

use crate::error::{TestError, TestResult};
use bilateral_core::{Frame, Plane, Sample, VideoInfo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample<T: Sample>(value: u32, peak: u32) -> T {
    T::from_f32_clamped(value as f32, peak)
}

fn from_fn<T: Sample>(
    width: u32,
    height: u32,
    mut f: impl FnMut(u32, u32) -> T,
) -> TestResult<Plane<T>> {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    Ok(Plane::from_vec(width, height, data)?)
}

/// Plane filled with one value.
pub fn flat_plane<T: Sample>(width: u32, height: u32, value: u32, peak: u32) -> TestResult<Plane<T>> {
    Ok(Plane::new_with_value(width, height, sample(value, peak))?)
}

/// Vertical step edge: `lo` left of column `width / 2`, `hi` from there on.
pub fn edge_plane<T: Sample>(
    width: u32,
    height: u32,
    lo: u32,
    hi: u32,
    peak: u32,
) -> TestResult<Plane<T>> {
    let (lo, hi) = (sample(lo, peak), sample(hi, peak));
    from_fn(width, height, |x, _| if x < width / 2 { lo } else { hi })
}

/// Checkerboard of `cell`-sized squares, `lo` in the top-left square.
pub fn checkerboard_plane<T: Sample>(
    width: u32,
    height: u32,
    cell: u32,
    lo: u32,
    hi: u32,
    peak: u32,
) -> TestResult<Plane<T>> {
    if cell == 0 {
        return Err(TestError::InvalidPattern("cell size must be positive".into()));
    }
    let (lo, hi) = (sample(lo, peak), sample(hi, peak));
    from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { lo } else { hi }
    })
}

/// Horizontal ramp from 0 at the left column to `peak` at the right column.
pub fn ramp_plane<T: Sample>(width: u32, height: u32, peak: u32) -> TestResult<Plane<T>> {
    let span = width.saturating_sub(1).max(1) as f32;
    from_fn(width, height, |x, _| {
        T::from_f32_clamped(x as f32 * peak as f32 / span, peak)
    })
}

/// Uniform random samples in `[0, peak]`, reproducible from `seed`.
pub fn noise_plane<T: Sample>(width: u32, height: u32, peak: u32, seed: u64) -> TestResult<Plane<T>> {
    let mut rng = StdRng::seed_from_u64(seed);
    from_fn(width, height, |_, _| sample(rng.random_range(0..=peak), peak))
}

/// Copy of `plane` with uniform noise in `[-amplitude, amplitude]` added.
pub fn add_noise<T: Sample>(
    plane: &Plane<T>,
    amplitude: u32,
    peak: u32,
    seed: u64,
) -> TestResult<Plane<T>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = amplitude as i64;
    let data = plane
        .data()
        .iter()
        .map(|v| {
            let noisy = v.to_index() as i64 + rng.random_range(-a..=a);
            sample(noisy.clamp(0, peak as i64) as u32, peak)
        })
        .collect();
    Ok(Plane::from_vec(plane.width(), plane.height(), data)?)
}

/// Frame for `info` whose planes come from `make(plane, width, height)`.
pub fn build_frame<T: Sample>(
    info: &VideoInfo,
    mut make: impl FnMut(usize, u32, u32) -> TestResult<Plane<T>>,
) -> TestResult<Frame> {
    let planes = (0..info.format.num_planes())
        .map(|i| {
            let (w, h) = info.plane_dimensions(i);
            make(i, w, h)
        })
        .collect::<TestResult<Vec<_>>>()?;
    Ok(Frame::from_planes(info.format, planes)?)
}
