mod api;
mod app;
mod application;
mod config;
mod domain;
mod ui;
mod utils;

use config::TriggerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "download_trigger=info".into()),
        )
        .init();

    let config = match TriggerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(endpoint = %config.api.endpoint, file = %config.file_name, "starting");

    iced::application(
        move || app::TriggerApp::from_config(&config),
        app::update,
        app::view,
    )
    .title("Data Download")
    .run()
}
