//! Qubic GUI
//!
//! Play 4x4x4 tic-tac-toe against the engine.

use std::path::Path;

use qubic::config::AppConfig;
use qubic::ui::QubicApp;

const CONFIG_PATH: &str = "qubic.toml";

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = match AppConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; using defaults", e);
            AppConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 520.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Qubic"),
        ..Default::default()
    };

    eframe::run_native(
        "Qubic",
        options,
        Box::new(move |cc| Ok(Box::new(QubicApp::new(cc, &config)))),
    )
}
