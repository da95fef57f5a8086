//! CLI configuration module

use clap::Parser;

use crate::{
    cli::Commands,
    config::{api::ApiConfig, observability::LoggingConfig, store::StoreConfig},
};

pub(crate) mod api;
pub(crate) mod observability;
pub(crate) mod store;

/// FoodWagon storefront CLI configuration
#[derive(Debug, Parser)]
#[command(name = "foodwagon", about = "FoodWagon storefront CLI", long_about = None)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Backend endpoints.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local persistence settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
