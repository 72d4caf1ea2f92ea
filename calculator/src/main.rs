//! Calculator - a four-function calculator for the Slow Computer
//!
//! Buttons and keyboard drive a small engine in `calccore`; this crate is
//! the window around it.

mod app;

use app::CalculatorApp;
use calccore::{config, logging, Settings};
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    let settings_path = config::settings_path();
    let loaded = Settings::load(&settings_path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&settings.log_level);
    if let Err(e) = &loaded {
        config::report_load_error(&settings_path, e);
    }
    tracing::info!(
        palette = settings.palette.label(),
        max_digits = settings.max_digits,
        "starting calculator"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::window_size())
            .with_resizable(false)
            .with_title("Calculator"),
        ..Default::default()
    };

    eframe::run_native(
        "calculator",
        options,
        Box::new(move |cc| Box::new(CalculatorApp::new(cc, settings, settings_path))),
    )
}
