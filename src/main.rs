mod ui;
mod engine;
mod model;

use anyhow::anyhow;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let settings = ui::settings_io::load_settings();
    info!(
        service = %settings.service_url,
        puzzle = settings.starting_puzzle,
        "starting jotto client"
    );
    let app = ui::app::JottoApp::new(settings)?;

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Jotto Game!",
        options,
        Box::new(|_cc| {
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("{err}"))
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
}
