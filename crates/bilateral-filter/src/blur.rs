//! Separable Gaussian blur on `f32` buffers
//!
//! Kernels are given as half-kernels: `kernel[d]` is the weight at distance
//! `d`, for `d in 0..=radius` (see [`SpatialTable::weights`]).
//!
//! Border handling omits taps that fall outside the buffer and
//! re-normalizes by the weights that were used. Because the 2D kernel is the
//! product of the two 1D kernels, a horizontal pass followed by a vertical
//! pass is exactly the clipped-and-renormalized 2D convolution over the
//! square window.
//!
//! [`SpatialTable::weights`]: crate::tables::SpatialTable::weights

/// Convolve one row with a half-kernel, renormalizing at the borders.
fn convolve_row(input: &[f32], kernel: &[f32], output: &mut [f32]) {
    let width = input.len();
    let radius = kernel.len().saturating_sub(1);

    for (x, out) in output.iter_mut().enumerate() {
        let x0 = x.saturating_sub(radius);
        let x1 = (x + radius).min(width - 1);

        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;
        for (nx, &v) in input[x0..=x1].iter().enumerate() {
            let k = kernel[(x0 + nx).abs_diff(x)];
            sum += v * k;
            weight_sum += k;
        }

        *out = if weight_sum > 0.0 { sum / weight_sum } else { 0.0 };
    }
}

/// Horizontal pass: `input` rows into `output` rows.
pub fn blur_horizontal(input: &[f32], output: &mut [f32], width: usize, kernel: &[f32]) {
    if kernel.len() <= 1 {
        output.copy_from_slice(input);
        return;
    }
    for (src_row, dst_row) in input
        .chunks_exact(width)
        .zip(output.chunks_exact_mut(width))
    {
        convolve_row(src_row, kernel, dst_row);
    }
}

/// Vertical pass: `input` into `output`, one output row at a time.
///
/// Rows are accumulated whole so the inner loop runs along memory.
pub fn blur_vertical(
    input: &[f32],
    output: &mut [f32],
    width: usize,
    height: usize,
    kernel: &[f32],
) {
    if kernel.len() <= 1 {
        output.copy_from_slice(input);
        return;
    }
    let radius = kernel.len() - 1;

    for (y, dst_row) in output.chunks_exact_mut(width).enumerate() {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(height - 1);

        dst_row.fill(0.0);
        let mut weight_sum = 0.0f32;
        for ny in y0..=y1 {
            let k = kernel[ny.abs_diff(y)];
            weight_sum += k;
            let src_row = &input[ny * width..(ny + 1) * width];
            for (d, &s) in dst_row.iter_mut().zip(src_row) {
                *d += s * k;
            }
        }

        if weight_sum > 0.0 {
            let inv = 1.0 / weight_sum;
            for d in dst_row.iter_mut() {
                *d *= inv;
            }
        }
    }
}

/// Blur `data` in place with separate horizontal and vertical half-kernels.
///
/// `scratch` must be the same length as `data`. A half-kernel of length
/// 0 or 1 leaves that axis untouched.
///
/// # Panics
///
/// Panics if `data.len() != width * height` or the scratch length differs.
pub fn blur_separable(
    data: &mut [f32],
    scratch: &mut [f32],
    width: usize,
    height: usize,
    kernel_x: &[f32],
    kernel_y: &[f32],
) {
    assert_eq!(data.len(), width * height);
    assert_eq!(scratch.len(), data.len());

    blur_horizontal(data, scratch, width, kernel_x);
    blur_vertical(scratch, data, width, height, kernel_y);
}
