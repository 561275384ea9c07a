use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// 2D circular convolution with "same" output size.
///
/// Periodic (wrap-around) boundary handling, so the result is the inverse
/// 2D DFT of the pointwise product of the forward transforms:
/// out(x,y) = sum over (i,j) of a(i,j) * b((x-i) mod w, (y-j) mod h).
/// Both inputs are row-major grids of identical `width * height` shape.
pub fn circular_convolve(a: &[f64], b: &[f64], width: usize, height: usize) -> Vec<f64> {
    assert_eq!(a.len(), width * height, "grid length must match dimensions");
    assert_eq!(b.len(), width * height, "grid length must match dimensions");

    let mut planner = FftPlanner::<f64>::new();
    let fwd_row = planner.plan_fft_forward(width);
    let fwd_col = planner.plan_fft_forward(height);
    let inv_row = planner.plan_fft_inverse(width);
    let inv_col = planner.plan_fft_inverse(height);

    let mut fa: Vec<Complex<f64>> = a.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut fb: Vec<Complex<f64>> = b.iter().map(|&v| Complex::new(v, 0.0)).collect();

    fft2(&mut fa, width, height, &fwd_row, &fwd_col);
    fft2(&mut fb, width, height, &fwd_row, &fwd_col);

    for (s, m) in fa.iter_mut().zip(fb.iter()) {
        *s *= *m;
    }

    fft2(&mut fa, width, height, &inv_row, &inv_col);

    // rustfft transforms are unnormalized; forward + inverse gains w*h
    let scale = 1.0 / (width * height) as f64;
    fa.iter().map(|c| c.re * scale).collect()
}

/// In-place 2D transform: rows first, then columns via transpose.
fn fft2(
    data: &mut [Complex<f64>],
    width: usize,
    height: usize,
    row_fft: &Arc<dyn Fft<f64>>,
    col_fft: &Arc<dyn Fft<f64>>,
) {
    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }
    let mut t = transpose(data, width, height);
    for col in t.chunks_exact_mut(height) {
        col_fft.process(col);
    }
    data.copy_from_slice(&transpose(&t, height, width));
}

fn transpose(data: &[Complex<f64>], width: usize, height: usize) -> Vec<Complex<f64>> {
    let mut out = vec![Complex::new(0.0, 0.0); data.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = data[y * width + x];
        }
    }
    out
}
