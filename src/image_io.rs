use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, Luma, RgbImage};
use rand::Rng;
use std::path::Path;

/// Default reference scene, looked up in the working directory.
pub const REFERENCE_PATH: &str = "reference.png";

pub fn load_image(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("Failed to load image: {e}"))
}

/// Resize image to fit within scene dimensions, preserving aspect ratio.
/// Letterboxes/pillarboxes remaining area with black and converts to grayscale.
pub fn resize_to_scene(img: &DynamicImage, scene_w: u32, scene_h: u32) -> GrayImage {
    let (iw, ih) = img.dimensions();
    let scale = f64::min(scene_w as f64 / iw as f64, scene_h as f64 / ih as f64);
    let new_w = (iw as f64 * scale).round() as u32;
    let new_h = (ih as f64 * scale).round() as u32;

    let resized = img.resize_exact(new_w, new_h, image::imageops::FilterType::Lanczos3);
    let resized_gray = resized.to_luma8();

    let mut output = ImageBuffer::from_pixel(scene_w, scene_h, Luma([0u8]));
    let offset_x = (scene_w.saturating_sub(new_w)) / 2;
    let offset_y = (scene_h.saturating_sub(new_h)) / 2;

    for y in 0..new_h {
        for x in 0..new_w {
            let pixel = resized_gray.get_pixel(x, y);
            if x + offset_x < scene_w && y + offset_y < scene_h {
                output.put_pixel(x + offset_x, y + offset_y, *pixel);
            }
        }
    }
    output
}

/// Convert a grayscale image to a row-major intensity grid in [0, 1].
pub fn image_to_scene(img: &GrayImage) -> Vec<f64> {
    img.pixels().map(|p| p[0] as f64 / 255.0).collect()
}

/// Synthesize a uniform-random scene in [0, 1).
pub fn random_scene(width: usize, height: usize) -> Vec<f64> {
    let mut rng = rand::rng();
    (0..width * height).map(|_| rng.random::<f64>()).collect()
}

/// Load a scene image from `path`, resized to the requested dimensions.
/// If the image is missing or unreadable, falls back to a random scene.
pub fn load_scene_or_fallback(path: &Path, scene_w: u32, scene_h: u32) -> Vec<f64> {
    match load_image(path) {
        Ok(img) => image_to_scene(&resize_to_scene(&img, scene_w, scene_h)),
        Err(e) => {
            log::warn!("{e}; falling back to a random scene");
            random_scene(scene_w as usize, scene_h as usize)
        }
    }
}

pub fn save_image(img: &RgbImage, path: &Path) -> Result<(), String> {
    img.save(path)
        .map_err(|e| format!("Failed to save image: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_falls_back_to_random_scene() {
        let scene = load_scene_or_fallback(Path::new("no_such_dir/missing.png"), 16, 12);
        assert_eq!(scene.len(), 16 * 12);
        assert!(scene.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn random_scene_is_unit_interval() {
        let scene = random_scene(40, 30);
        assert_eq!(scene.len(), 40 * 30);
        assert!(scene.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn resize_letterboxes_to_requested_shape() {
        // 2:1 source into a square scene: top/bottom bands stay black
        let src = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 32, Luma([200u8])));
        let gray = resize_to_scene(&src, 32, 32);
        assert_eq!(gray.dimensions(), (32, 32));
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert!(gray.get_pixel(16, 16)[0] > 0);

        let scene = image_to_scene(&gray);
        assert_eq!(scene.len(), 32 * 32);
        assert!(scene.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
