use digit_sketchpad::api::PredictionClient;
use digit_sketchpad::gui::SketchpadApp;
use digit_sketchpad::logging;
use digit_sketchpad::session::Session;
use digit_sketchpad::settings::{Settings, SETTINGS_FILE};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging);

    let base_url = settings.api_base_url();
    tracing::info!(%base_url, "using prediction service");
    let client = PredictionClient::new(&base_url)?;
    let session = Session::new(client);

    let (width, height) = settings.window_size.unwrap_or((420, 560));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    let app = SketchpadApp::new(settings, session);
    if let Err(err) = eframe::run_native(
        "Digit Sketchpad",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    ) {
        anyhow::bail!("ui event loop failed: {err}");
    }
    Ok(())
}
