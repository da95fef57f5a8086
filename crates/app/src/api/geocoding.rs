//! Reverse geocoding.

use async_trait::async_trait;
use foodwagon::location::{Coordinates, GeocodedAddress};
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Public Nominatim reverse-geocoding endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Errors that can occur while turning coordinates into an address.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoder returned a non-2xx response.
    #[error("geocoder responded with status {0}")]
    UnexpectedResponse(u16),
}

/// Turns a position into address parts.
#[automock]
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the address at `coordinates`.
    async fn reverse(&self, coordinates: Coordinates) -> Result<GeocodedAddress, GeocodingError>;
}

/// [`ReverseGeocoder`] backed by OpenStreetMap Nominatim.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

impl NominatimGeocoder {
    /// Create a geocoder calling `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(NOMINATIM_URL)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: GeocodedAddress,
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<GeocodedAddress, GeocodingError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
            ])
            .header(
                reqwest::header::USER_AGENT,
                concat!("foodwagon/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodingError::UnexpectedResponse(
                response.status().as_u16(),
            ));
        }

        let parsed: ReverseResponse = response.json().await?;

        Ok(parsed.address)
    }
}
