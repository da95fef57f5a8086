//! Catalog service.

use std::{fmt, sync::Arc};

use foodwagon::{
    menu::{MenuItem, Restaurant, RestaurantId},
    notifications::Notifier,
    orders::Order,
    session::AuthSession,
};
use tracing::debug;

use crate::api::{SearchResults, StorefrontApi};

use super::or_empty;

/// Read-only catalog lookups. Failures become error notifications and empty results.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Create a service calling `api`.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Restaurants, optionally limited to `city`.
    pub async fn restaurants(&self, city: Option<&str>) -> Vec<Restaurant> {
        let result = self
            .api
            .fetch_restaurants(city.map(str::to_string))
            .await;

        or_empty(&self.notifier, "Failed to load restaurants", result)
    }

    /// One restaurant's menu.
    pub async fn menu(&self, restaurant: RestaurantId) -> Vec<MenuItem> {
        let result = self.api.fetch_menu(restaurant).await;

        or_empty(&self.notifier, "Failed to load menu", result)
    }

    /// Search restaurants and dishes. A blank query matches nothing and makes no request.
    pub async fn search(&self, query: &str) -> SearchResults {
        let query = query.trim();

        if query.is_empty() {
            debug!("skipping blank search");

            return SearchResults::default();
        }

        let result = self.api.search(query.to_string()).await;

        or_empty(&self.notifier, "Search failed", result)
    }

    /// Order history of the signed-in user. Anonymous sessions have none.
    pub async fn orders(&self, session: &AuthSession) -> Vec<Order> {
        let Some(user) = session.user() else {
            return Vec::new();
        };

        let result = self.api.fetch_orders(user.id).await;

        or_empty(&self.notifier, "Failed to load orders", result)
    }
}
