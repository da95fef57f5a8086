//! Backend Config

use clap::Args;
use foodwagon_app::api::{DEFAULT_BASE_URL, NOMINATIM_URL};

/// Backend endpoints.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront backend base URL
    #[arg(long, env = "FOODWAGON_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Reverse geocoding endpoint
    #[arg(long, env = "FOODWAGON_GEOCODER_URL", default_value = NOMINATIM_URL, global = true)]
    pub geocoder_url: String,
}
