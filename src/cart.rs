//! Cart

use std::sync::Arc;

use tracing::debug;

use crate::{
    menu::{MenuItem, MenuItemId},
    notifications::{Notifier, Severity},
};

/// A menu item and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item: MenuItem,
    quantity: u32,
}

impl CartLine {
    /// The item on this line.
    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> u64 {
        self.item.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart lines in first-added order, at most one per menu item.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    notifier: Arc<dyn Notifier>,
}

impl Cart {
    /// Create an empty cart that reports changes to `notifier`.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Cart {
            lines: Vec::new(),
            notifier,
        }
    }

    /// Add one of `item`, merging into an existing line.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }

        debug!(item = %item.id, count = self.count(), "added item to cart");

        self.notifier
            .notify(Severity::Success, &format!("Added {} to cart", item.name));
    }

    /// Remove one of the item with `id`. Returns `false` if it was not in the cart.
    pub fn remove_item(&mut self, id: MenuItemId) -> bool {
        let Some(position) = self.lines.iter().position(|line| line.item.id == id) else {
            return false;
        };

        let Some(line) = self.lines.get_mut(position) else {
            return false;
        };

        let name = line.item.name.clone();

        if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.lines.remove(position);
        }

        debug!(item = %id, count = self.count(), "removed item from cart");

        self.notifier
            .notify(Severity::Info, &format!("Removed {name} from cart"));

        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(0, u64::saturating_add)
    }

    /// Sum of quantities over all lines.
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Lines in first-added order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line holding `id`, if any.
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    /// Quantity of `id` in the cart, zero when absent.
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.line(id).map_or(0, CartLine::quantity)
    }
}
