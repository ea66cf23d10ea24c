mod app;
mod colors;
mod fonts;
mod io;
mod model;
mod panel;
mod thumbs;

use app::DesktopApp;
use fonts::configure_fonts;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use trendscope_common::ViewerSettings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trendscope_desktop=info,trendscope_common=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = io::load_settings().unwrap_or_else(|err| {
        warn!(error = %err, "settings load failed, using defaults");
        ViewerSettings::default()
    });

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Trendscope Viewer",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(settings))
        }),
    )
}
