//! Location detection.
//!
//! Detection is split into three steps so the slow part never holds the state: take a ticket,
//! resolve the position without touching state, then hand the outcome back with the ticket.
//! A newer detection or a manual city pick in between makes the older outcome stale.

use std::{fmt, sync::Arc};

use foodwagon::location::{
    Coordinates, DetectionOutcome, FormFill, GeolocationError, LocationState,
};
use thiserror::Error;
use tracing::warn;

use crate::api::{GeocodingError, ReverseGeocoder};

/// Errors that can occur while filling the address form from the device position.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The position could not be read.
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// The position could not be turned into an address.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
}

/// Resolves device positions through a reverse geocoder.
#[derive(Clone)]
pub struct LocationService {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService").finish_non_exhaustive()
    }
}

impl LocationService {
    /// Create a service calling `geocoder`.
    #[must_use]
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Turn a position reading into a detection outcome.
    pub async fn resolve(
        &self,
        position: Result<Coordinates, GeolocationError>,
    ) -> DetectionOutcome {
        let coordinates = match position {
            Ok(coordinates) => coordinates,
            Err(error) => return DetectionOutcome::Failed(error),
        };

        match self.geocoder.reverse(coordinates).await {
            Ok(address) => DetectionOutcome::Resolved(address),
            Err(error) => {
                warn!(%error, "reverse geocoding failed");

                DetectionOutcome::GeocodingFailed(coordinates)
            }
        }
    }

    /// Run one detection against `state`. Returns `false` if the result arrived stale.
    pub async fn detect(
        &self,
        state: &mut LocationState,
        position: Result<Coordinates, GeolocationError>,
    ) -> bool {
        let ticket = state.begin_detection();
        let outcome = self.resolve(position).await;

        state.complete_detection(ticket, outcome)
    }

    /// City and area for the address form. No default city is substituted.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if the position cannot be read or geocoded.
    pub async fn detect_for_form(
        &self,
        position: Result<Coordinates, GeolocationError>,
    ) -> Result<FormFill, LocationError> {
        let address = self.geocoder.reverse(position?).await?;

        Ok(address.form_fill())
    }
}
