//! FoodWagon storefront CLI

use std::{
    fmt::Display,
    io,
    process::ExitCode,
};

use foodwagon_app::context::AppContext;
use tracing::debug;

use crate::config::AppConfig;

mod cli;
mod config;
mod observability;

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = AppConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init_subscriber(&config.logging) {
        return report(error);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}

async fn run(config: AppConfig) -> Result<(), String> {
    let AppConfig {
        api,
        store,
        command,
        ..
    } = config;

    debug!(store = %store.store_path.display(), api = %api.api_url, "starting");

    let mut ctx = AppContext::from_paths(&store.store_path, &api.api_url, &api.geocoder_url)
        .map_err(|error| format!("{error}: {}", store.store_path.display()))?;

    command.run(&mut ctx, &mut io::stdout().lock()).await
}

#[expect(clippy::print_stderr, reason = "top-level error reporting")]
fn report(error: impl Display) -> ExitCode {
    eprintln!("{error}");

    ExitCode::FAILURE
}
