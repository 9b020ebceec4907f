#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use doodle_museum::{Config, DoodleApp};

fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = Config::from_env().unwrap_or_else(|err| {
        log::error!("Falling back to default configuration: {}", err);
        Config::default()
    });
    log::info!("Storing gallery data under {}", config.data_dir.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Doodle Museum",
        native_options,
        Box::new(|cc| Ok(Box::new(DoodleApp::new(cc, config)?))),
    )
}
