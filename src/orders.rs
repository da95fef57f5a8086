//! Orders
//!
//! Order payloads sent at checkout, orders read back from the backend, and the partner board's
//! status lifecycle.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::menu::{MenuItemId, RestaurantId};

/// Order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet accepted.
    Pending,

    /// Kitchen is cooking.
    Preparing,

    /// Waiting for pickup.
    Ready,

    /// With the rider.
    Dispatched,

    /// Handed to the customer.
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
    ];

    /// The status the partner board moves an order to next.
    ///
    /// Dispatching a ready order marks it delivered.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Dispatched | OrderStatus::Delivered => None,
        }
    }

    /// Wire name, e.g. `PREPARING`.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    /// Lower-case label used in messages.
    pub fn label(self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method tag. Nothing is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "COD")]
    Cod,

    /// Paid online.
    #[serde(rename = "ONLINE")]
    Online,
}

/// A frozen order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item.
    pub id: MenuItemId,

    /// Name at the time of ordering.
    pub name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Unit price in rupees.
    pub price: u64,
}

/// Checkout payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Customer.
    pub user_id: UserId,

    /// Restaurant of the first cart line.
    pub restaurant_id: RestaurantId,

    /// Restaurant name of the first cart line.
    pub restaurant_name: String,

    /// Lines in cart order.
    pub items: Vec<OrderItem>,

    /// Grand total including fees and tax.
    pub total_amount: u64,

    /// Formatted delivery address.
    pub delivery_address: String,

    /// Customer name.
    pub customer_name: String,

    /// Customer phone, if known.
    pub customer_phone: Option<String>,

    /// Payment method.
    pub payment_method: PaymentMethod,
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier.
    pub id: OrderId,

    /// Customer, when known.
    #[serde(default)]
    pub user_id: Option<UserId>,

    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Amount charged.
    pub total_amount: u64,

    /// Current status.
    pub status: OrderStatus,

    /// Placement date as sent by the backend.
    pub date: String,

    /// Customer name.
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Customer phone.
    #[serde(default)]
    pub customer_phone: Option<String>,

    /// Delivery address.
    #[serde(default)]
    pub delivery_address: Option<String>,

    /// Restaurant name.
    #[serde(default)]
    pub restaurant_name: Option<String>,

    /// Restaurant.
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,

    /// Restaurant cover image.
    #[serde(default)]
    pub restaurant_image_url: Option<String>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity)
            .fold(0, u32::saturating_add)
    }
}

/// Orders per status, for the partner dashboard counters.
pub fn status_counts(orders: &[Order]) -> FxHashMap<OrderStatus, usize> {
    orders.iter().fold(FxHashMap::default(), |mut counts, order| {
        *counts.entry(order.status).or_insert(0) += 1;
        counts
    })
}

/// A new dish submitted from the partner dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    /// Restaurant the dish belongs to.
    pub restaurant_id: RestaurantId,

    /// Dish name.
    pub name: String,

    /// Description.
    pub description: String,

    /// Price in rupees.
    pub price: u64,

    /// Menu section.
    pub category: String,

    /// Vegetarian marker.
    pub is_veg: bool,

    /// Image URL. Required.
    pub image_url: String,
}
