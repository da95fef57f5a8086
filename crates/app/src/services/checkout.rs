//! Checkout service.

use std::{fmt, sync::Arc};

use foodwagon::{
    checkout::{self, CheckoutBlock, Navigation},
    notifications::Severity,
    orders::{Order, PaymentMethod},
    pricing::PricingError,
};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    api::{ApiError, StorefrontApi},
    storefront::Storefront,
};

/// Shown after a successful order.
pub const ORDER_PLACED: &str = "Order placed successfully!";

/// Shown when the backend rejects an order.
pub const ORDER_FAILED: &str = "Failed to place order. Please try again.";

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The gate refused to proceed.
    #[error(transparent)]
    Blocked(#[from] CheckoutBlock),

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The backend call failed.
    #[error("failed to place order: {0}")]
    Api(#[from] ApiError),
}

/// A placed order and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Order as recorded by the backend.
    pub order: Order,

    /// Next screen.
    pub navigation: Navigation,
}

/// Places orders for the current cart.
#[derive(Clone)]
pub struct CheckoutService {
    api: Arc<dyn StorefrontApi>,
}

impl fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutService").finish_non_exhaustive()
    }
}

impl CheckoutService {
    /// Create a service calling `api`.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Gate, freeze and submit the cart.
    ///
    /// The cart is cleared only after the backend accepts the order. No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Blocked`] when the gate refuses, after raising its notice, or
    /// [`CheckoutError::Api`] when the backend call fails, leaving the cart as it was.
    pub async fn place_order(
        &self,
        storefront: &mut Storefront,
        payment_method: PaymentMethod,
    ) -> Result<PlacedOrder, CheckoutError> {
        let notifier = storefront.notifier();

        let gate = checkout::evaluate(
            storefront.session(),
            storefront.addresses(),
            storefront.cart(),
        );

        let request = match gate {
            Ok(ready) => ready.order_request(payment_method)?,
            Err(block) => {
                if let Some((severity, message)) = block.notice() {
                    notifier.notify(severity, message);
                }

                return Err(block.into());
            }
        };

        match self.api.submit_order(request).await {
            Ok(order) => {
                info!(order = %order.id, total = order.total_amount, "order placed");

                storefront.cart_mut().clear();
                notifier.notify(Severity::Success, ORDER_PLACED);

                Ok(PlacedOrder {
                    order,
                    navigation: Navigation::OrderHistory,
                })
            }
            Err(api_error) => {
                error!(error = %api_error, "order submission failed");
                notifier.notify(Severity::Error, ORDER_FAILED);

                Err(api_error.into())
            }
        }
    }
}
