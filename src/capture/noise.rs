use rand_distr::{Distribution, Normal};

/// Add read-out noise (Gaussian-distributed, mean 0, std `sigma`) to every
/// pixel. `sigma <= 0` leaves the grid untouched, so a noiseless capture is
/// bit-exact. Values are not clamped; a measurement may go negative.
pub fn add_gaussian_noise(grid: &mut [f64], sigma: f64) {
    if sigma <= 0.0 {
        return;
    }
    let mut rng = rand::rng();
    let dist = Normal::new(0.0, sigma).unwrap();
    for pixel in grid.iter_mut() {
        *pixel += dist.sample(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_noop() {
        let original: Vec<f64> = (0..100).map(|i| i as f64 * 0.01).collect();
        let mut grid = original.clone();
        add_gaussian_noise(&mut grid, 0.0);
        assert_eq!(grid, original);
    }

    #[test]
    fn positive_sigma_perturbs() {
        let original = vec![0.5; 1000];
        let mut grid = original.clone();
        add_gaussian_noise(&mut grid, 1.0);
        let changed = grid
            .iter()
            .zip(original.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 900, "only {changed} of 1000 pixels changed");

        // mean offset should stay near zero for this many samples
        let mean_delta: f64 = grid
            .iter()
            .zip(original.iter())
            .map(|(a, b)| a - b)
            .sum::<f64>()
            / grid.len() as f64;
        assert!(mean_delta.abs() < 0.2, "mean delta was {mean_delta}");
    }
}
