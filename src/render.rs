//! Display mapping for float grids. Raw simulation values are never touched;
//! these functions only produce bytes for textures and PNG export.

/// Gamma-compress a normalized value (sRGB-like transfer with linear toe).
fn apply_display_gamma(v: f64, gamma: f64) -> f64 {
    if gamma <= 0.0 {
        return v;
    }
    let v = v.clamp(0.0, 1.0);
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / gamma) - 0.055
    }
}

/// Convert a float grid to 8-bit RGB bytes for display.
///
/// Values are min/max stretched to [0, 1] first; a flat grid maps to black.
pub fn grid_to_bytes(grid: &[f64], gamma: f64) -> Vec<u8> {
    let (lo, hi) = grid.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| (lo.min(v), hi.max(v)),
    );
    let span = hi - lo;

    let mut bytes = Vec::with_capacity(grid.len() * 3);
    for &v in grid {
        let n = if span > 0.0 { (v - lo) / span } else { 0.0 };
        let g = apply_display_gamma(n, gamma).clamp(0.0, 1.0);
        let byte = (g * 255.0).round() as u8;
        bytes.push(byte);
        bytes.push(byte);
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_three_bytes_per_pixel() {
        let grid: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let bytes = grid_to_bytes(&grid, 2.2);
        assert_eq!(bytes.len(), 24 * 3);
    }

    #[test]
    fn stretch_covers_full_range() {
        let bytes = grid_to_bytes(&[-5.0, 0.0, 10.0], 2.2);
        assert_eq!(&bytes[0..3], &[0, 0, 0]);
        assert_eq!(&bytes[6..9], &[255, 255, 255]);
    }

    #[test]
    fn flat_grid_maps_to_black() {
        let bytes = grid_to_bytes(&[3.0; 9], 2.2);
        assert!(bytes.iter().all(|&b| b == 0));
    }
}
