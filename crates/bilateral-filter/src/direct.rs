//! Direct bilateral evaluation
//!
//! For every output pixel:
//!
//! ```text
//! out(x, y) = Σ src(x+dx, y+dy) · Ws(dx, dy) · Wr(|ref(x, y) − ref(x+dx, y+dy)|)
//!             ───────────────────────────────────────────────────────────────
//!                               Σ Ws(dx, dy) · Wr(...)
//! ```
//!
//! over the square window `[-r, r]²`. Neighbors outside the plane are
//! omitted and the sum is renormalized by the weights that were used.
//! The center sample always contributes with weight 1, so the normalizer
//! never vanishes.
//!
//! Exact, but O(window²) per pixel.

use crate::tables::{RangeTable, SpatialTable};
use crate::{FilterError, FilterResult};
use bilateral_core::{Plane, Sample};

pub(crate) fn check_plane_sizes<T: Sample>(
    src: &Plane<T>,
    reference: &Plane<T>,
    dst: &Plane<T>,
) -> FilterResult<()> {
    if !src.sizes_equal(reference) {
        return Err(FilterError::FrameMismatch(format!(
            "reference plane is {}x{}, source plane is {}x{}",
            reference.width(),
            reference.height(),
            src.width(),
            src.height()
        )));
    }
    if !src.sizes_equal(dst) {
        return Err(FilterError::FrameMismatch(format!(
            "destination plane is {}x{}, source plane is {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        )));
    }
    Ok(())
}

/// Bilateral-filter `src` into `dst`, taking range weights from `reference`.
///
/// Pass `src` as `reference` for ordinary (self-guided) filtering.
///
/// # Errors
///
/// Returns [`FilterError::FrameMismatch`] if the three planes differ in size.
pub fn bilateral_direct<T: Sample>(
    src: &Plane<T>,
    reference: &Plane<T>,
    spatial: &SpatialTable,
    range: &RangeTable,
    dst: &mut Plane<T>,
) -> FilterResult<()> {
    check_plane_sizes(src, reference, dst)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let r = spatial.radius();
    let ws = spatial.weights();
    let peak = range.peak();
    let max_diff = peak as usize;
    let src_data = src.data();
    let ref_data = reference.data();

    for (y, out_row) in dst.rows_mut().enumerate() {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(h - 1);

        for (x, out) in out_row.iter_mut().enumerate() {
            let x0 = x.saturating_sub(r);
            let x1 = (x + r).min(w - 1);
            let center = ref_data[y * w + x].to_index();

            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;
            for ny in y0..=y1 {
                let wy = ws[ny.abs_diff(y)];
                let row = ny * w;
                for nx in x0..=x1 {
                    let idx = row + nx;
                    let diff = ref_data[idx].to_index().abs_diff(center).min(max_diff);
                    let weight = wy * ws[nx.abs_diff(x)] * range.weight(diff);
                    sum += src_data[idx].to_f32() * weight;
                    weight_sum += weight;
                }
            }

            *out = if weight_sum > 0.0 {
                T::from_f32_clamped(sum / weight_sum, peak)
            } else {
                src_data[y * w + x]
            };
        }
    }

    Ok(())
}
