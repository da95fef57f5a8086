//! Partner dashboard.

use std::{fmt, sync::Arc};

use foodwagon::{
    menu::{MenuItem, MenuItemId, Restaurant},
    notifications::{Notifier, Severity},
    orders::{MenuItemDraft, Order, OrderId, OrderStatus, status_counts},
    session::User,
};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{error, info};

use crate::api::{ApiError, StorefrontApi};

/// Menu section used when a draft has none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Errors that can occur on the partner dashboard.
#[derive(Debug, Error)]
pub enum PartnerError {
    /// The signed-in user does not run a restaurant.
    #[error("partner account required")]
    NotPartner,

    /// No such order on the board.
    #[error("unknown order: {0}")]
    UnknownOrder(OrderId),

    /// The order has no further status.
    #[error("order {0} is already {1}")]
    Finished(OrderId, OrderStatus),

    /// No such dish on the menu.
    #[error("unknown menu item: {0}")]
    UnknownItem(MenuItemId),

    /// A dish needs an image.
    #[error("dish image URL required")]
    MissingImage,

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A partner's restaurant with its orders and menu.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDashboard {
    restaurant: Restaurant,
    orders: Vec<Order>,
    menu: Vec<MenuItem>,
}

impl PartnerDashboard {
    /// Assemble a dashboard.
    pub fn new(restaurant: Restaurant, orders: Vec<Order>, menu: Vec<MenuItem>) -> Self {
        Self {
            restaurant,
            orders,
            menu,
        }
    }

    /// The partner's restaurant.
    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    /// Orders received.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Current menu, newest additions first.
    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Orders per status.
    pub fn status_counts(&self) -> FxHashMap<OrderStatus, usize> {
        status_counts(&self.orders)
    }

    /// Sum of every order's total.
    pub fn revenue(&self) -> u64 {
        self.orders
            .iter()
            .map(|order| order.total_amount)
            .fold(0, u64::saturating_add)
    }

    fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| order.id == id)
    }

    fn item_mut(&mut self, id: MenuItemId) -> Option<&mut MenuItem> {
        self.menu.iter_mut().find(|item| item.id == id)
    }
}

/// Dashboard operations. Failures raise an error notification and leave the board unchanged.
#[derive(Clone)]
pub struct PartnerService {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PartnerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerService").finish_non_exhaustive()
    }
}

impl PartnerService {
    /// Create a service calling `api`.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Load the restaurant run by `user`, then its orders and menu together.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::NotPartner`] for customers, or the first failed fetch.
    pub async fn load_dashboard(&self, user: &User) -> Result<PartnerDashboard, PartnerError> {
        if !user.is_partner() {
            return Err(PartnerError::NotPartner);
        }

        let restaurant = self.api.fetch_partner_restaurant(user.id).await?;

        let (orders, menu) = tokio::join!(
            self.api.fetch_restaurant_orders(restaurant.id),
            self.api.fetch_menu(restaurant.id),
        );

        Ok(PartnerDashboard::new(restaurant, orders?, menu?))
    }

    /// Move an order one step along the board.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError`] if the order is unknown or finished, or the update fails.
    pub async fn advance_order(
        &self,
        dashboard: &mut PartnerDashboard,
        id: OrderId,
    ) -> Result<OrderStatus, PartnerError> {
        let current = dashboard
            .order_mut(id)
            .map(|order| order.status)
            .ok_or(PartnerError::UnknownOrder(id))?;

        let next = current.next().ok_or(PartnerError::Finished(id, current))?;

        if let Err(api_error) = self.api.update_order_status(id, next).await {
            error!(order = %id, error = %api_error, "failed to update order status");
            self.notifier
                .notify(Severity::Error, "Failed to update status");

            return Err(api_error.into());
        }

        if let Some(order) = dashboard.order_mut(id) {
            order.status = next;
        }

        info!(order = %id, status = %next, "order advanced");

        self.notifier.notify(
            Severity::Success,
            &format!("Order #{id} is now {}.", next.label()),
        );

        Ok(next)
    }

    /// Add a dish to the menu.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::MissingImage`] without calling the backend when no image URL is
    /// given, or the backend's error.
    pub async fn add_menu_item(
        &self,
        dashboard: &mut PartnerDashboard,
        mut draft: MenuItemDraft,
    ) -> Result<MenuItem, PartnerError> {
        if draft.image_url.trim().is_empty() {
            self.notifier
                .notify(Severity::Error, "Please provide a dish image URL");

            return Err(PartnerError::MissingImage);
        }

        if draft.category.trim().is_empty() {
            draft.category = DEFAULT_CATEGORY.to_string();
        }

        draft.restaurant_id = dashboard.restaurant.id;

        let item = match self.api.add_menu_item(draft).await {
            Ok(item) => item,
            Err(api_error) => {
                error!(error = %api_error, "failed to add menu item");
                self.notifier
                    .notify(Severity::Error, "Failed to add menu item");

                return Err(api_error.into());
            }
        };

        dashboard.menu.insert(0, item.clone());

        self.notifier.notify(
            Severity::Success,
            &format!("{} added to your menu!", item.name),
        );

        Ok(item)
    }

    /// Flip a dish between available and out of stock. Returns the new availability.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError`] if the dish is unknown or the toggle fails.
    pub async fn toggle_stock(
        &self,
        dashboard: &mut PartnerDashboard,
        id: MenuItemId,
    ) -> Result<bool, PartnerError> {
        if dashboard.item_mut(id).is_none() {
            return Err(PartnerError::UnknownItem(id));
        }

        let updated = match self.api.toggle_menu_item_stock(id).await {
            Ok(updated) => updated,
            Err(api_error) => {
                error!(item = %id, error = %api_error, "failed to toggle stock");
                self.notifier.notify(Severity::Error, "Failed to toggle stock");

                return Err(api_error.into());
            }
        };

        let available = updated.is_available();
        let message = if available {
            format!("{} is now available.", updated.name)
        } else {
            format!("{} is now out of stock.", updated.name)
        };

        if let Some(item) = dashboard.item_mut(id) {
            *item = updated;
        }

        self.notifier.notify(Severity::Info, &message);

        Ok(available)
    }
}
