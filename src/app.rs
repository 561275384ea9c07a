use eframe::egui;
use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::capture::ScenePreset;
use crate::image_io;
use crate::pipeline::{self, SimOutput, SimParams};
use crate::render;

pub struct CaptureApp {
    custom_image: Option<DynamicImage>,
    custom_path: Option<PathBuf>,
    scene_texture: Option<egui::TextureHandle>,
    mask_textures: Vec<egui::TextureHandle>,
    measurement_textures: Vec<egui::TextureHandle>,
    output: Option<SimOutput>,
    params: SimParams,
    needs_capture: bool,
    auto_capture: bool,
    capture_time_ms: f64,
}

impl CaptureApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            custom_image: None,
            custom_path: None,
            scene_texture: None,
            mask_textures: Vec::new(),
            measurement_textures: Vec::new(),
            output: None,
            params: SimParams::default(),
            // run once on startup so the window is never empty
            needs_capture: true,
            auto_capture: false,
            capture_time_ms: 0.0,
        }
    }

    fn open_scene(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"])
            .pick_file()
        {
            match image_io::load_image(&path) {
                Ok(img) => {
                    self.custom_image = Some(img);
                    self.custom_path = Some(path);
                    self.params.scene_preset = ScenePreset::Custom;
                    self.needs_capture = true;
                }
                Err(e) => {
                    log::error!("Error loading scene: {e}");
                }
            }
        }
    }

    fn save_panels(&self) {
        let Some(output) = &self.output else {
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let save_grid = |grid: &[f64], name: String| {
            let bytes = render::grid_to_bytes(grid, self.params.display_gamma);
            let img = image::RgbImage::from_raw(
                output.width as u32,
                output.height as u32,
                bytes,
            )
            .expect("Failed to create image buffer");
            if let Err(e) = image_io::save_image(&img, &dir.join(name)) {
                log::error!("Error saving panel: {e}");
            }
        };

        save_grid(&output.scene, "scene.png".to_string());
        for (i, mask) in output.masks.iter().enumerate() {
            save_grid(mask, format!("mask_{i:02}.png"));
        }
        for (i, meas) in output.measurements.iter().enumerate() {
            save_grid(meas, format!("measurement_{i:02}.png"));
        }
    }

    /// Produce the scene grid for the current preset. Reference and custom
    /// sources fall back to a random scene when unavailable.
    fn load_scene(&self) -> Vec<f64> {
        let w = self.params.scene_width;
        let h = self.params.scene_height;
        match self.params.scene_preset {
            ScenePreset::Reference => {
                image_io::load_scene_or_fallback(Path::new(image_io::REFERENCE_PATH), w, h)
            }
            ScenePreset::Random => image_io::random_scene(w as usize, h as usize),
            ScenePreset::Custom => match &self.custom_image {
                Some(img) => image_io::image_to_scene(&image_io::resize_to_scene(img, w, h)),
                None => {
                    log::warn!("no custom scene loaded; falling back to a random scene");
                    image_io::random_scene(w as usize, h as usize)
                }
            },
        }
    }

    fn run_capture(&mut self, ctx: &egui::Context) {
        let scene = self.load_scene();

        let start = std::time::Instant::now();
        let output = pipeline::simulate(scene, &self.params);
        self.capture_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let gamma = self.params.display_gamma;
        self.scene_texture = Some(grid_texture(ctx, "scene", &output.scene, &output, gamma));
        self.mask_textures = output
            .masks
            .iter()
            .enumerate()
            .map(|(i, m)| grid_texture(ctx, &format!("mask_{i}"), m, &output, gamma))
            .collect();
        self.measurement_textures = output
            .measurements
            .iter()
            .enumerate()
            .map(|(i, m)| grid_texture(ctx, &format!("measurement_{i}"), m, &output, gamma))
            .collect();
        self.output = Some(output);
    }
}

fn grid_texture(
    ctx: &egui::Context,
    name: &str,
    grid: &[f64],
    output: &SimOutput,
    gamma: f64,
) -> egui::TextureHandle {
    let bytes = render::grid_to_bytes(grid, gamma);
    let color_image = egui::ColorImage::from_rgb([output.width, output.height], &bytes);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel: file operations and scene source
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Scene").clicked() {
                    self.open_scene();
                }
                if ui.button("Save Panels").clicked() {
                    self.save_panels();
                }
                ui.separator();

                ui.label("Scene:");
                let current_name = self.params.scene_preset.name();
                egui::ComboBox::from_id_salt("scene_preset")
                    .selected_text(current_name)
                    .show_ui(ui, |ui| {
                        for &preset in ScenePreset::ALL {
                            if ui
                                .selectable_value(
                                    &mut self.params.scene_preset,
                                    preset,
                                    preset.name(),
                                )
                                .clicked()
                            {
                                self.needs_capture = true;
                            }
                        }
                    });

                if self.params.scene_preset == ScenePreset::Custom {
                    if let Some(name) = self.custom_path.as_ref().and_then(|p| p.file_name()) {
                        ui.label(name.to_string_lossy().into_owned());
                    }
                }

                ui.separator();
                ui.checkbox(&mut self.auto_capture, "Auto");

                if ui.button("Capture").clicked() {
                    self.needs_capture = true;
                }
                if ui.button("Reset").clicked() {
                    self.params = SimParams::default();
                    self.needs_capture = true;
                }

                ui.separator();
                if self.output.is_some() {
                    ui.label(format!(
                        "{}x{} | {} masks | {:.0}ms",
                        self.params.scene_width,
                        self.params.scene_height,
                        self.params.mask_count,
                        self.capture_time_ms
                    ));
                }
            });
        });

        // Left panel: controls
        egui::SidePanel::left("controls")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut changed = false;
                    changed |= ui_scene(ui, &mut self.params);
                    changed |= ui_masks(ui, &mut self.params);
                    changed |= ui_noise(ui, &mut self.params);
                    changed |= ui_display(ui, &mut self.params);

                    if changed && self.auto_capture {
                        self.needs_capture = true;
                    }
                });
            });

        // Capture if needed
        if self.needs_capture {
            self.run_capture(ctx);
            self.needs_capture = false;
        }

        // Central panel: scene / mask / measurement grid
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(scene_tex), Some(output)) = (&self.scene_texture, &self.output) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Press Capture to begin");
                });
                return;
            };

            egui::ScrollArea::both().show(ui, |ui| {
                let tile_w = (ui.available_width() / 2.2).clamp(96.0, 384.0);
                let tile_h = tile_w * output.height as f32 / output.width as f32;
                let size = egui::vec2(tile_w, tile_h);

                ui.label("Scene");
                ui.image(egui::load::SizedTexture::new(scene_tex.id(), size));

                for (i, (mask_tex, meas_tex)) in self
                    .mask_textures
                    .iter()
                    .zip(self.measurement_textures.iter())
                    .enumerate()
                {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(format!("Mask {i}"));
                            ui.image(egui::load::SizedTexture::new(mask_tex.id(), size));
                        });
                        ui.vertical(|ui| {
                            ui.label(format!("Measurement {i}"));
                            ui.image(egui::load::SizedTexture::new(meas_tex.id(), size));
                        });
                    });
                }
            });
        });
    }
}

// --- UI Section Builders ---

fn ui_scene(ui: &mut egui::Ui, params: &mut SimParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Scene")
        .default_open(true)
        .show(ui, |ui| {
            let mut w = params.scene_width;
            let mut h = params.scene_height;
            changed |= ui
                .add(egui::Slider::new(&mut w, 16..=512).text("Width"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut h, 16..=512).text("Height"))
                .changed();
            params.scene_width = w;
            params.scene_height = h;
        });
    changed
}

fn ui_masks(ui: &mut egui::Ui, params: &mut SimParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Masks")
        .default_open(true)
        .show(ui, |ui| {
            let mut count = params.mask_count as i32;
            changed |= ui
                .add(egui::Slider::new(&mut count, 1..=12).text("Mask Count"))
                .changed();
            params.mask_count = count as usize;

            changed |= ui
                .add(egui::Slider::new(&mut params.mask_density, 0.0..=1.0).text("Density"))
                .changed();
        });
    changed
}

fn ui_noise(ui: &mut egui::Ui, params: &mut SimParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Noise")
        .default_open(true)
        .show(ui, |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.noise_std, 0.0..=2000.0)
                        .logarithmic(true)
                        .text("Noise Std"),
                )
                .changed();
        });
    changed
}

fn ui_display(ui: &mut egui::Ui, params: &mut SimParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Display")
        .default_open(false)
        .show(ui, |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut params.display_gamma, 0.1..=4.0).text("Gamma"))
                .changed();
        });
    changed
}
