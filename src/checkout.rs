//! Checkout gate
//!
//! Decides whether the cart can be ordered and freezes it into an [`OrderRequest`].

use thiserror::Error;

use crate::{
    addresses::{AddressBook, UserAddress},
    cart::Cart,
    notifications::Severity,
    orders::{OrderItem, OrderRequest, PaymentMethod},
    pricing::{PricingBreakdown, PricingError, compute_breakdown},
    session::{AuthSession, User},
};

/// Restaurant name used when the first cart line does not carry one.
pub const FALLBACK_RESTAURANT_NAME: &str = "Local Kitchen";

/// Why checkout cannot proceed, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutBlock {
    /// Nobody is signed in.
    #[error("login required")]
    LoginRequired,

    /// No delivery address is selected.
    #[error("delivery address required")]
    AddressRequired,

    /// The cart is empty.
    #[error("cart is empty")]
    EmptyCart,
}

impl CheckoutBlock {
    /// Notification to show for this block, if any. An empty cart is silent.
    pub fn notice(self) -> Option<(Severity, &'static str)> {
        match self {
            CheckoutBlock::LoginRequired => Some((Severity::Info, "Please login to place an order.")),
            CheckoutBlock::AddressRequired => Some((
                Severity::Error,
                "Please select a delivery address first.",
            )),
            CheckoutBlock::EmptyCart => None,
        }
    }
}

/// Where the client should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The signed-in user's order history.
    OrderHistory,
}

/// Everything needed to place an order, borrowed from live state.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutReady<'a> {
    user: &'a User,
    address: &'a UserAddress,
    cart: &'a Cart,
}

/// Check the gate in precedence order: login, then address, then a non-empty cart.
///
/// # Errors
///
/// Returns the first [`CheckoutBlock`] that applies.
pub fn evaluate<'a>(
    session: &'a AuthSession,
    addresses: &'a AddressBook,
    cart: &'a Cart,
) -> Result<CheckoutReady<'a>, CheckoutBlock> {
    let user = session
        .user()
        .filter(|_| session.is_authenticated())
        .ok_or(CheckoutBlock::LoginRequired)?;

    let address = addresses.selected().ok_or(CheckoutBlock::AddressRequired)?;

    if cart.is_empty() {
        return Err(CheckoutBlock::EmptyCart);
    }

    Ok(CheckoutReady {
        user,
        address,
        cart,
    })
}

impl CheckoutReady<'_> {
    /// Signed-in customer.
    pub fn user(&self) -> &User {
        self.user
    }

    /// Selected delivery address.
    pub fn address(&self) -> &UserAddress {
        self.address
    }

    /// Charges for the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the totals overflow.
    pub fn breakdown(&self) -> Result<PricingBreakdown, PricingError> {
        compute_breakdown(self.cart)
    }

    /// Freeze the cart into an order payload.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the totals overflow.
    pub fn order_request(&self, payment_method: PaymentMethod) -> Result<OrderRequest, PricingError> {
        let breakdown = self.breakdown()?;
        let first = self.cart.lines().first().map(|line| line.item());

        let restaurant_id = first.map(|item| item.restaurant_id).unwrap_or_default();

        let restaurant_name = first
            .and_then(|item| item.restaurant_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_RESTAURANT_NAME)
            .to_string();

        let items = self
            .cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                id: line.item().id,
                name: line.item().name.clone(),
                quantity: line.quantity(),
                price: line.item().price,
            })
            .collect();

        Ok(OrderRequest {
            user_id: self.user.id,
            restaurant_id,
            restaurant_name,
            items,
            total_amount: breakdown.grand_total,
            delivery_address: self.address.display_line(),
            customer_name: self.user.name.clone(),
            customer_phone: self.user.phone.clone(),
            payment_method,
        })
    }
}
