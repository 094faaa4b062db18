//! Approximate bilateral evaluation by piecewise-linear intensity levels
//!
//! The range kernel is sampled at `n` intensity levels `L_0 < ... < L_{n-1}`
//! spread evenly over `[0, peak]`. For each level `k`:
//!
//! ```text
//! num_k = G ∗ (Wr(|L_k − ref|) · src)
//! den_k = G ∗  Wr(|L_k − ref|)
//! ```
//!
//! where `G` is the spatial Gaussian, applied as a separable blur. A pixel
//! whose reference value `v` lies in `[L_k, L_{k+1}]` takes the linear
//! interpolation of `num_k / den_k` and `num_{k+1} / den_{k+1}` at `v`.
//!
//! Cost is `n` separable blurs of two planes, independent of the window
//! area. With one level per representable intensity the result equals
//! [`bilateral_direct`](crate::direct::bilateral_direct).

use crate::blur::blur_separable;
use crate::direct::check_plane_sizes;
use crate::tables::{RangeTable, SpatialTable};
use crate::{FilterError, FilterResult};
use bilateral_core::{Plane, Sample};

/// Blurred normalizers below this are treated as "no support at this level".
pub const NORMALIZER_EPSILON: f32 = 1e-12;

/// Intensity levels `round(k · peak / (n − 1))` for `k in 0..n`.
///
/// `n` is clamped to `2..=peak + 1`, which keeps the levels strictly
/// increasing.
pub fn intensity_levels(level_count: usize, peak: u32) -> Vec<u32> {
    let n = level_count.clamp(2, peak as usize + 1);
    let step = peak as f64 / (n - 1) as f64;
    (0..n)
        .map(|k| ((k as f64 * step).round() as u32).min(peak))
        .collect()
}

/// Bracketing level and interpolation weight for one intensity
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    /// Lower level index; the upper is `lower + 1`.
    lower: usize,
    /// Weight of the upper level, in `[0, 1]`.
    t: f32,
}

/// For every intensity `0..=peak`, the level pair enclosing it.
fn bracket_table(levels: &[u32], peak: u32) -> Vec<Bracket> {
    let last = levels.len() - 2;
    let mut lower = 0usize;
    (0..=peak)
        .map(|v| {
            while lower < last && levels[lower + 1] <= v {
                lower += 1;
            }
            let lo = levels[lower];
            let hi = levels[lower + 1];
            let t = (v.saturating_sub(lo)) as f32 / (hi - lo) as f32;
            Bracket {
                lower,
                t: t.min(1.0),
            }
        })
        .collect()
}

/// Bilateral-filter `src` into `dst` using `level_count` intensity levels.
///
/// Range weights come from `reference`; pass `src` for self-guided
/// filtering.
///
/// # Errors
///
/// Returns [`FilterError::FrameMismatch`] if the planes differ in size and
/// [`FilterError::InvalidLevelCount`] if `level_count < 2`.
pub fn bilateral_approximate<T: Sample>(
    src: &Plane<T>,
    reference: &Plane<T>,
    spatial: &SpatialTable,
    range: &RangeTable,
    level_count: usize,
    dst: &mut Plane<T>,
) -> FilterResult<()> {
    check_plane_sizes(src, reference, dst)?;
    if level_count < 2 {
        return Err(FilterError::InvalidLevelCount(level_count as i64));
    }

    let w = src.width() as usize;
    let h = src.height() as usize;
    let peak = range.peak();
    let levels = intensity_levels(level_count, peak);
    let brackets = bracket_table(&levels, peak);
    let kernel = spatial.weights();

    let src_values: Vec<f32> = src.data().iter().map(|v| v.to_f32()).collect();
    let ref_index: Vec<usize> = reference
        .data()
        .iter()
        .map(|v| v.to_index().min(peak as usize))
        .collect();

    let size = w * h;
    let mut num = vec![0.0f32; size];
    let mut den = vec![0.0f32; size];
    let mut scratch = vec![0.0f32; size];
    let mut acc = vec![0.0f32; size];
    let mut acc_weight = vec![0.0f32; size];

    for (k, &level) in levels.iter().enumerate() {
        let level = level as usize;
        for i in 0..size {
            let wr = range.weight(ref_index[i].abs_diff(level));
            num[i] = wr * src_values[i];
            den[i] = wr;
        }
        blur_separable(&mut num, &mut scratch, w, h, kernel, kernel);
        blur_separable(&mut den, &mut scratch, w, h, kernel, kernel);

        for i in 0..size {
            let b = brackets[ref_index[i]];
            let a = if b.lower == k {
                1.0 - b.t
            } else if b.lower + 1 == k {
                b.t
            } else {
                continue;
            };
            if a <= 0.0 || den[i] < NORMALIZER_EPSILON {
                continue;
            }
            acc[i] += a * num[i] / den[i];
            acc_weight[i] += a;
        }
    }

    for (i, out) in dst.data_mut().iter_mut().enumerate() {
        *out = if acc_weight[i] > 0.0 {
            T::from_f32_clamped(acc[i] / acc_weight[i], peak)
        } else {
            src.data()[i]
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::bilateral_direct;

    fn textured_plane(w: u32, h: u32) -> Plane<u8> {
        let data = (0..h)
            .flat_map(|y| {
                (0..w).map(move |x| {
                    let base: u32 = if x < w / 2 { 40 } else { 190 };
                    (base + (x * 7 + y * 13) % 23) as u8
                })
            })
            .collect();
        Plane::from_vec(w, h, data).unwrap()
    }

    #[test]
    fn test_intensity_levels() {
        assert_eq!(intensity_levels(2, 255), vec![0, 255]);
        assert_eq!(intensity_levels(4, 255), vec![0, 85, 170, 255]);
        assert_eq!(intensity_levels(256, 255), (0..=255).collect::<Vec<_>>());
        // Clamped to the available levels
        assert_eq!(intensity_levels(1000, 3), vec![0, 1, 2, 3]);
        assert_eq!(intensity_levels(0, 255), vec![0, 255]);
    }

    #[test]
    fn test_bracket_table() {
        let levels = intensity_levels(4, 255);
        let table = bracket_table(&levels, 255);
        assert_eq!(table[0], Bracket { lower: 0, t: 0.0 });
        assert_eq!(table[85].lower, 1);
        assert_eq!(table[85].t, 0.0);
        assert_eq!(table[255], Bracket { lower: 2, t: 1.0 });
        assert!((table[100].t - 15.0 / 85.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_plane_unchanged() {
        let src = Plane::new_with_value(12, 9, 100u8).unwrap();
        let spatial = SpatialTable::new(2.0).unwrap();
        let range = RangeTable::new(0.1, 8).unwrap();
        let mut dst = Plane::new(12, 9).unwrap();
        bilateral_approximate(&src, &src, &spatial, &range, 8, &mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_full_levels_match_direct() {
        let src = textured_plane(24, 16);
        let spatial = SpatialTable::new(1.5).unwrap();
        let range = RangeTable::new(0.1, 8).unwrap();

        let mut direct = Plane::new(24, 16).unwrap();
        bilateral_direct(&src, &src, &spatial, &range, &mut direct).unwrap();
        let mut approx = Plane::new(24, 16).unwrap();
        bilateral_approximate(&src, &src, &spatial, &range, 256, &mut approx).unwrap();

        assert!(approx.max_abs_diff(&direct).unwrap() <= 1);
    }

    #[test]
    fn test_error_shrinks_with_levels() {
        let src = textured_plane(32, 24);
        let spatial = SpatialTable::new(2.0).unwrap();
        let range = RangeTable::new(0.05, 8).unwrap();

        let mut direct = Plane::new(32, 24).unwrap();
        bilateral_direct(&src, &src, &spatial, &range, &mut direct).unwrap();

        let error = |n: usize| {
            let mut out = Plane::new(32, 24).unwrap();
            bilateral_approximate(&src, &src, &spatial, &range, n, &mut out).unwrap();
            out.mean_abs_diff(&direct).unwrap()
        };
        let coarse = error(4);
        let fine = error(64);
        assert!(fine <= coarse);
        assert!(fine < 2.0);
    }

    #[test]
    fn test_edge_preserved() {
        let data = (0..16 * 16)
            .map(|i| if i % 16 < 8 { 20u8 } else { 230 })
            .collect();
        let src = Plane::from_vec(16, 16, data).unwrap();
        let spatial = SpatialTable::new(2.0).unwrap();
        let range = RangeTable::new(0.1, 8).unwrap();
        let mut dst = Plane::new(16, 16).unwrap();
        bilateral_approximate(&src, &src, &spatial, &range, 8, &mut dst).unwrap();
        assert!(dst.get_pixel(7, 8).unwrap() < 40);
        assert!(dst.get_pixel(8, 8).unwrap() > 210);
    }

    #[test]
    fn test_rejects_single_level() {
        let src = Plane::<u8>::new(4, 4).unwrap();
        let spatial = SpatialTable::new(1.0).unwrap();
        let range = RangeTable::new(0.1, 8).unwrap();
        let mut dst = Plane::new(4, 4).unwrap();
        let err = bilateral_approximate(&src, &src, &spatial, &range, 1, &mut dst);
        assert!(matches!(err, Err(FilterError::InvalidLevelCount(1))));
    }

    #[test]
    fn test_16bit_flat() {
        let src = Plane::new_with_value(10, 10, 40000u16).unwrap();
        let spatial = SpatialTable::new(1.0).unwrap();
        let range = RangeTable::new(0.05, 16).unwrap();
        let mut dst = Plane::new(10, 10).unwrap();
        bilateral_approximate(&src, &src, &spatial, &range, 16, &mut dst).unwrap();
        assert_eq!(dst, src);
    }
}
