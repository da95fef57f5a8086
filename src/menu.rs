//! Catalog models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu item identifier, unique within a restaurant's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u64);

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Restaurant identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RestaurantId(pub u64);

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A dish on a restaurant's menu. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Identifier.
    pub id: MenuItemId,

    /// Display name.
    pub name: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// Price in rupees.
    pub price: u64,

    /// Image URL.
    #[serde(default)]
    pub image_url: String,

    /// Vegetarian marker.
    #[serde(default)]
    pub is_veg: bool,

    /// Menu section, e.g. "Burgers".
    #[serde(default)]
    pub category: String,

    /// Owning restaurant.
    pub restaurant_id: RestaurantId,

    /// Owning restaurant's name, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,

    /// Stock flag. Absent means in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl MenuItem {
    /// Whether the item can be ordered.
    pub fn is_available(&self) -> bool {
        self.in_stock.unwrap_or(true)
    }
}

/// Promotional banner attached to a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInfo {
    /// Headline, e.g. "50% OFF".
    pub header: String,

    /// Secondary line, e.g. "UPTO ₹100".
    #[serde(default)]
    pub sub_header: String,
}

/// Restaurant summary as shown on listing cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Identifier.
    pub id: RestaurantId,

    /// Display name.
    pub name: String,

    /// Cover image URL.
    #[serde(default)]
    pub image_url: String,

    /// Average rating, 0-5.
    pub rating: f64,

    /// Free-text delivery estimate, e.g. "30-35 mins".
    pub delivery_time: String,

    /// Free-text price band, e.g. "₹500 for two".
    pub cost_for_two: String,

    /// Cuisines served.
    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Neighbourhood.
    #[serde(default)]
    pub location: String,

    /// City.
    #[serde(default)]
    pub city: String,

    /// Recently onboarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,

    /// Serves only vegetarian food.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pure_veg: Option<bool>,

    /// Running offer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregated_discount_info: Option<DiscountInfo>,
}
