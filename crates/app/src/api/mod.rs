//! Storefront backend boundary.

use async_trait::async_trait;
use foodwagon::{
    menu::{MenuItem, MenuItemId, Restaurant, RestaurantId},
    orders::{MenuItemDraft, Order, OrderId, OrderRequest, OrderStatus, UserId},
    session::User,
};
use mockall::automock;
use serde::{Deserialize, Serialize};

mod errors;
mod geocoding;
mod http;

pub use errors::ApiError;
pub use geocoding::{
    GeocodingError, MockReverseGeocoder, NOMINATIM_URL, NominatimGeocoder, ReverseGeocoder,
};
pub use http::{DEFAULT_BASE_URL, HttpStorefrontApi};

/// Restaurants and dishes matching a search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching restaurants.
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,

    /// Matching dishes.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl SearchResults {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty() && self.items.is_empty()
    }
}

/// A signed-in user and their session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Opaque session token.
    pub token: String,

    /// Profile.
    pub user: User,
}

/// Operations offered by the storefront backend.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// List restaurants, optionally in one city.
    async fn fetch_restaurants(&self, city: Option<String>) -> Result<Vec<Restaurant>, ApiError>;

    /// A restaurant's menu.
    async fn fetch_menu(&self, restaurant: RestaurantId) -> Result<Vec<MenuItem>, ApiError>;

    /// Search restaurants and dishes.
    async fn search(&self, query: String) -> Result<SearchResults, ApiError>;

    /// Place an order.
    async fn submit_order(&self, request: OrderRequest) -> Result<Order, ApiError>;

    /// A customer's order history.
    async fn fetch_orders(&self, user: UserId) -> Result<Vec<Order>, ApiError>;

    /// The restaurant run by a partner.
    async fn fetch_partner_restaurant(&self, partner: UserId) -> Result<Restaurant, ApiError>;

    /// Orders received by a restaurant.
    async fn fetch_restaurant_orders(
        &self,
        restaurant: RestaurantId,
    ) -> Result<Vec<Order>, ApiError>;

    /// Move an order to `status`, returning the status the backend recorded.
    async fn update_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, ApiError>;

    /// Add a dish to a restaurant's menu.
    async fn add_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, ApiError>;

    /// Flip a dish between in stock and out of stock.
    async fn toggle_menu_item_stock(&self, item: MenuItemId) -> Result<MenuItem, ApiError>;

    /// Sign in with an email or phone number.
    async fn login(&self, identifier: String, password: String)
    -> Result<AuthResponse, ApiError>;

    /// Create an account.
    async fn register(
        &self,
        name: String,
        identifier: String,
        password: String,
    ) -> Result<AuthResponse, ApiError>;
}
