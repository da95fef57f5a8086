//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Local persistence settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// JSON file holding saved addresses, favorites and the session
    #[arg(
        long,
        env = "FOODWAGON_STORE",
        default_value = "foodwagon-store.json",
        global = true
    )]
    pub store_path: PathBuf,
}
