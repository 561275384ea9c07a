use crate::capture::ScenePreset;
use crate::capture::convolve;
use crate::capture::mask;
use crate::capture::noise;

/// All simulation parameters controlled by the user.
#[derive(Debug, Clone)]
pub struct SimParams {
    // Scene
    pub scene_width: u32,
    pub scene_height: u32,
    pub scene_preset: ScenePreset,

    // Masks
    pub mask_count: usize,
    pub mask_density: f64,

    // Noise
    pub noise_std: f64,

    // Display
    pub display_gamma: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            scene_width: 128,
            scene_height: 128,
            scene_preset: ScenePreset::Reference,

            mask_count: 4,
            mask_density: 0.5,

            noise_std: 0.0,

            display_gamma: 2.2,
        }
    }
}

/// One full capture run: the scene plus the per-mask results.
#[derive(Debug, Clone)]
pub struct SimOutput {
    pub width: usize,
    pub height: usize,
    pub scene: Vec<f64>,
    pub masks: Vec<Vec<f64>>,
    pub measurements: Vec<Vec<f64>>,
}

/// Compute one noisy measurement per mask.
///
/// Each measurement is the circular convolution of the scene with the mask,
/// "same" output size, plus independent Gaussian noise of std `noise_std`.
pub fn simulate_capture(
    scene: &[f64],
    masks: &[Vec<f64>],
    width: usize,
    height: usize,
    noise_std: f64,
) -> Vec<Vec<f64>> {
    masks
        .iter()
        .map(|m| {
            let mut measured = convolve::circular_convolve(scene, m, width, height);
            noise::add_gaussian_noise(&mut measured, noise_std);
            measured
        })
        .collect()
}

/// Run a full coded-aperture capture of `scene`: synthesize `mask_count`
/// random binary masks and measure through each one.
pub fn simulate(scene: Vec<f64>, params: &SimParams) -> SimOutput {
    let width = params.scene_width as usize;
    let height = params.scene_height as usize;
    assert_eq!(
        scene.len(),
        width * height,
        "scene length must match configured dimensions"
    );

    let masks: Vec<Vec<f64>> = (0..params.mask_count)
        .map(|_| mask::generate_random_mask(width, height, params.mask_density))
        .collect();

    let measurements = simulate_capture(&scene, &masks, width, height, params.noise_std);

    log::debug!(
        "captured {} measurements of {}x{} scene (density {:.2}, noise std {:.3})",
        measurements.len(),
        width,
        height,
        params.mask_density,
        params.noise_std
    );

    SimOutput {
        width,
        height,
        scene,
        masks,
        measurements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_io;

    #[test]
    fn noiseless_measurement_equals_convolution_exactly() {
        let (w, h) = (16, 12);
        let scene = image_io::random_scene(w, h);
        let masks = vec![
            mask::generate_random_mask(w, h, 0.5),
            mask::generate_random_mask(w, h, 0.2),
        ];

        let measured = simulate_capture(&scene, &masks, w, h, 0.0);
        for (meas, m) in measured.iter().zip(masks.iter()) {
            let conv = convolve::circular_convolve(&scene, m, w, h);
            assert_eq!(meas, &conv);
        }
    }

    #[test]
    fn noisy_measurement_differs_from_convolution() {
        let (w, h) = (16, 16);
        let scene = image_io::random_scene(w, h);
        let masks = vec![mask::generate_random_mask(w, h, 0.5)];

        let measured = simulate_capture(&scene, &masks, w, h, 5.0);
        let conv = convolve::circular_convolve(&scene, &masks[0], w, h);
        assert_ne!(measured[0], conv);
    }

    #[test]
    fn simulate_produces_one_measurement_per_mask() {
        let params = SimParams {
            scene_width: 24,
            scene_height: 18,
            mask_count: 3,
            ..SimParams::default()
        };
        let scene = image_io::random_scene(24, 18);
        let out = simulate(scene, &params);

        assert_eq!(out.width, 24);
        assert_eq!(out.height, 18);
        assert_eq!(out.masks.len(), 3);
        assert_eq!(out.measurements.len(), 3);
        for m in &out.masks {
            assert_eq!(m.len(), 24 * 18);
            assert!(m.iter().all(|&v| v == 0.0 || v == 1.0));
        }
        for meas in &out.measurements {
            assert_eq!(meas.len(), 24 * 18);
        }
    }

    #[test]
    #[should_panic]
    fn mismatched_scene_shape_is_fatal() {
        let params = SimParams::default();
        simulate(vec![0.0; 10], &params);
    }
}
