// Desktop entry point for the admin console
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod records;
mod rest;
mod ui;

use admin_core::AppConfig;

#[tokio::main]
async fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    if !config.session().is_authenticated() {
        log::warn!("ADMIN_API_TOKEN is not set; the backend will reject writes");
    }
    log::info!("admin console targeting {}", config.api_base);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Admin Console"),
        ..Default::default()
    };

    eframe::run_native(
        "Admin Console",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app::AdminApp::new(cc, config)))
        }),
    )
}
