use rand_distr::{Bernoulli, Distribution};

/// Generate a random binary sampling mask.
///
/// Each pixel is independently 1.0 with probability `density`, else 0.0.
/// A density outside [0, 1] is a programmer error and panics.
pub fn generate_random_mask(width: usize, height: usize, density: f64) -> Vec<f64> {
    let mut rng = rand::rng();
    let dist = Bernoulli::new(density).expect("mask density must be in [0, 1]");
    (0..width * height)
        .map(|_| if dist.sample(&mut rng) { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_binary() {
        let mask = generate_random_mask(64, 48, 0.3);
        assert_eq!(mask.len(), 64 * 48);
        assert!(mask.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn empirical_density_tracks_request() {
        let mask = generate_random_mask(256, 256, 0.5);
        let mean = mask.iter().sum::<f64>() / mask.len() as f64;
        // std of the sample mean is ~0.002 here; 0.02 is a wide margin
        assert!((mean - 0.5).abs() < 0.02, "mean was {mean}");
    }

    #[test]
    fn density_extremes() {
        assert!(generate_random_mask(32, 32, 0.0).iter().all(|&v| v == 0.0));
        assert!(generate_random_mask(32, 32, 1.0).iter().all(|&v| v == 1.0));
    }

    #[test]
    #[should_panic]
    fn invalid_density_panics() {
        generate_random_mask(8, 8, 1.5);
    }
}
