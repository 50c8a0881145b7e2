// Rust Timeline Application
// Main entry point

use rust_timeline::services::settings::SettingsService;
use rust_timeline::ui_egui::TimelineApp;

fn main() -> eframe::Result {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Timeline Application");

    let settings_service = SettingsService::for_user();
    let settings = settings_service.load_or_default();
    log::info!(
        "Loaded settings from {}: snap={}ms, resize={:?}",
        settings_service.path().display(),
        settings.drag_snap_ms,
        settings.can_resize
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rust Timeline")
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Timeline",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc, settings, settings_service)))),
    )
}
