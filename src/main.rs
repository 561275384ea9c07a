mod app;
mod capture;
mod image_io;
mod pipeline;
mod render;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Coded Aperture Capture"),
        ..Default::default()
    };

    eframe::run_native(
        "Coded Aperture Capture",
        options,
        Box::new(|cc| Ok(Box::new(app::CaptureApp::new(cc)))),
    )
}
