//! Async orchestration over the backend.
//!
//! Services own an [`Arc`] to the API and borrow the [`Storefront`](crate::storefront::Storefront)
//! mutably only while applying a result, so every failure leaves prior state untouched.

use std::sync::Arc;

use foodwagon::notifications::{Notifier, Severity};
use tracing::error;

use crate::api::ApiError;

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod location;
pub mod partner;

pub use auth::{AuthError, AuthService};
pub use catalog::CatalogService;
pub use checkout::{CheckoutError, CheckoutService, PlacedOrder};
pub use location::{LocationError, LocationService};
pub use partner::{PartnerDashboard, PartnerError, PartnerService};

/// Unwrap a read-only fetch, turning a failure into an error notification and an empty value.
fn or_empty<T: Default>(
    notifier: &Arc<dyn Notifier>,
    failure: &str,
    result: Result<T, ApiError>,
) -> T {
    result.unwrap_or_else(|error| {
        error!(%error, "{failure}");
        notifier.notify(Severity::Error, failure);

        T::default()
    })
}
