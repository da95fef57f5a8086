//! Location
//!
//! The city and address shown in the header. Detection is asynchronous, so every detection is
//! stamped with a generation number and only the newest one may write its result.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// City used until the user picks or detects one.
pub const DEFAULT_CITY: &str = "Bangalore";

/// City shown when coordinates could not be geocoded.
pub const CURRENT_LOCATION: &str = "Current Location";

/// A position on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// `"{lat}, {lon}"` with four decimals.
    pub fn display(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Address parts returned by a reverse geocoder. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// City.
    #[serde(default)]
    pub city: Option<String>,

    /// Town.
    #[serde(default)]
    pub town: Option<String>,

    /// Village.
    #[serde(default)]
    pub village: Option<String>,

    /// State district.
    #[serde(default)]
    pub state_district: Option<String>,

    /// Suburb.
    #[serde(default)]
    pub suburb: Option<String>,

    /// Neighbourhood.
    #[serde(default)]
    pub neighbourhood: Option<String>,

    /// Road.
    #[serde(default)]
    pub road: Option<String>,
}

fn first_present<'a>(candidates: impl IntoIterator<Item = &'a Option<String>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter_map(Option::as_deref)
        .map(str::trim)
        .find(|value| !value.is_empty())
}

impl GeocodedAddress {
    /// First of city, town, village or state district.
    pub fn city_name(&self) -> Option<&str> {
        first_present([&self.city, &self.town, &self.village, &self.state_district])
    }

    /// First of suburb, neighbourhood or road.
    pub fn area_name(&self) -> Option<&str> {
        first_present([&self.suburb, &self.neighbourhood, &self.road])
    }

    /// City and area for pre-filling the address form, without any default city.
    pub fn form_fill(&self) -> FormFill {
        FormFill {
            city: self.city_name().unwrap_or_default().to_string(),
            area: self.area_name().unwrap_or_default().to_string(),
        }
    }
}

/// Values detected for the address form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFill {
    /// Detected city, possibly empty.
    pub city: String,

    /// Detected area, possibly empty.
    pub area: String,
}

/// Why the device position could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The platform has no geolocation.
    #[error("Geolocation not supported")]
    Unsupported,

    /// The user refused access.
    #[error("Permission denied")]
    PermissionDenied,

    /// No fix could be obtained.
    #[error("Position unavailable")]
    PositionUnavailable,

    /// No fix within the time limit.
    #[error("Request timed out")]
    Timeout,

    /// Any other platform failure, with its message.
    #[error("{0}")]
    Other(String),
}

/// Result of one detection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    /// Position read and geocoded.
    Resolved(GeocodedAddress),

    /// Position read but geocoding failed.
    GeocodingFailed(Coordinates),

    /// Position could not be read.
    Failed(GeolocationError),
}

/// Proof of which detection request a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionTicket {
    generation: u64,
}

/// Header location state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationState {
    city: String,
    address: String,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for LocationState {
    fn default() -> Self {
        LocationState {
            city: DEFAULT_CITY.to_string(),
            address: format!("{DEFAULT_CITY}, India"),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl LocationState {
    /// Start at the default city.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Current display address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether a detection is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reason the last detection failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pick a city by hand, abandoning any detection in flight.
    pub fn select_city(&mut self, name: &str) {
        self.generation += 1;
        self.city = name.to_string();
        self.address = format!("{name}, India");
        self.error = None;
        self.loading = false;
    }

    /// Start a detection. Results for earlier tickets are ignored from now on.
    pub fn begin_detection(&mut self) -> DetectionTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        DetectionTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the newest detection.
    pub fn is_current(&self, ticket: DetectionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a detection result. Returns `false`, changing nothing, if `ticket` is stale.
    pub fn complete_detection(&mut self, ticket: DetectionTicket, outcome: DetectionOutcome) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale location result"
            );

            return false;
        }

        match outcome {
            DetectionOutcome::Resolved(address) => {
                let city = address.city_name().unwrap_or(DEFAULT_CITY).to_string();

                self.address = match address.area_name() {
                    Some(area) => format!("{area}, {city}"),
                    None => city.clone(),
                };
                self.city = city;
            }
            DetectionOutcome::GeocodingFailed(coordinates) => {
                self.city = CURRENT_LOCATION.to_string();
                self.address = coordinates.display();
            }
            DetectionOutcome::Failed(error) => {
                self.error = Some(error.to_string());
            }
        }

        self.loading = false;

        true
    }
}
