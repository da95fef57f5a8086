//! App Context

use std::{fmt, path::Path, sync::Arc};

use foodwagon::store::{JsonFileStore, KeyValueStore, StoreError};
use thiserror::Error;

use crate::{
    api::{HttpStorefrontApi, NominatimGeocoder, ReverseGeocoder, StorefrontApi},
    services::{AuthService, CatalogService, CheckoutService, LocationService, PartnerService},
    storefront::Storefront,
};

/// Errors raised while wiring the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The store file exists but could not be read.
    #[error("failed to open store")]
    Store(#[source] StoreError),
}

/// State and services for one run of the client.
pub struct AppContext {
    /// Client-side state.
    pub storefront: Storefront,
    pub catalog: CatalogService,
    pub checkout: CheckoutService,
    pub auth: AuthService,
    pub partner: PartnerService,
    pub location: LocationService,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("storefront", &self.storefront)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire services over the given backends.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn StorefrontApi>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let storefront = Storefront::open(store);
        let notifier = storefront.notifier();

        Self {
            catalog: CatalogService::new(api.clone(), notifier.clone()),
            checkout: CheckoutService::new(api.clone()),
            auth: AuthService::new(api.clone()),
            partner: PartnerService::new(api, notifier),
            location: LocationService::new(geocoder),
            storefront,
        }
    }

    /// Build application context from a store file and backend URLs.
    ///
    /// # Errors
    ///
    /// Returns an error when the store file cannot be opened.
    pub fn from_paths(
        store_path: &Path,
        api_url: &str,
        geocoder_url: &str,
    ) -> Result<Self, AppInitError> {
        let store = JsonFileStore::open(store_path).map_err(AppInitError::Store)?;

        Ok(Self::new(
            Arc::new(store),
            Arc::new(HttpStorefrontApi::new(api_url)),
            Arc::new(NominatimGeocoder::new(geocoder_url)),
        ))
    }
}
