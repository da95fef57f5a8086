//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::cart::Cart;

/// Flat delivery fee in rupees.
pub const DELIVERY_FEE: u64 = 30;

/// Flat platform fee in rupees.
pub const PLATFORM_FEE: u64 = 5;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount overflowed or could not be represented.
    #[error("amount overflowed while computing totals")]
    Overflow,
}

/// Tax charged on the item total (5%).
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(5, 2))
}

/// Charges derived from a cart. Never cached; recompute after every cart change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingBreakdown {
    /// Sum of line subtotals.
    pub item_total: u64,

    /// Delivery fee.
    pub delivery_fee: u64,

    /// Platform fee.
    pub platform_fee: u64,

    /// Tax on the item total, rounded half up.
    pub tax: u64,

    /// Everything above added together.
    pub grand_total: u64,
}

/// Price the current contents of `cart`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the totals do not fit.
pub fn compute_breakdown(cart: &Cart) -> Result<PricingBreakdown, PricingError> {
    breakdown_for_item_total(cart.total())
}

/// Price an item total.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the totals do not fit.
pub fn breakdown_for_item_total(item_total: u64) -> Result<PricingBreakdown, PricingError> {
    let tax = percent_of(tax_rate(), item_total)?;

    let grand_total = [DELIVERY_FEE, PLATFORM_FEE, tax]
        .into_iter()
        .try_fold(item_total, u64::checked_add)
        .ok_or(PricingError::Overflow)?;

    Ok(PricingBreakdown {
        item_total,
        delivery_fee: DELIVERY_FEE,
        platform_fee: PLATFORM_FEE,
        tax,
        grand_total,
    })
}

/// `percent` of `amount`, rounded half away from zero to whole rupees.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product cannot be represented.
pub fn percent_of(percent: Percentage, amount: u64) -> Result<u64, PricingError> {
    let applied = (percent * Decimal::ONE)
        .checked_mul(Decimal::from(amount))
        .ok_or(PricingError::Overflow)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}

/// Whole rupees as INR money, for display.
pub fn rupees(amount: u64) -> Money<'static, Currency> {
    Money::from_major(i64::try_from(amount).unwrap_or(i64::MAX), iso::INR)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        menu::{MenuItem, MenuItemId, RestaurantId},
        notifications::NotificationCenter,
    };

    use super::*;

    #[test]
    fn breakdown_for_two_hundred() -> TestResult {
        let breakdown = breakdown_for_item_total(200)?;

        assert_eq!(breakdown.tax, 10);
        assert_eq!(breakdown.delivery_fee, 30);
        assert_eq!(breakdown.platform_fee, 5);
        assert_eq!(breakdown.grand_total, 245);

        Ok(())
    }

    #[test]
    fn tax_rounds_half_up() -> TestResult {
        assert_eq!(breakdown_for_item_total(210)?.tax, 11);
        assert_eq!(breakdown_for_item_total(209)?.tax, 10);
        assert_eq!(breakdown_for_item_total(0)?.tax, 0);

        Ok(())
    }

    #[test]
    fn empty_cart_still_carries_fees() -> TestResult {
        let breakdown = breakdown_for_item_total(0)?;

        assert_eq!(breakdown.grand_total, DELIVERY_FEE + PLATFORM_FEE);

        Ok(())
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            breakdown_for_item_total(u64::MAX),
            Err(PricingError::Overflow)
        );
    }

    #[test]
    fn compute_breakdown_reads_cart_total() -> TestResult {
        let mut cart = Cart::new(Arc::new(NotificationCenter::new()));
        let item = MenuItem {
            id: MenuItemId(1),
            name: "Thali".to_string(),
            description: String::new(),
            price: 105,
            image_url: String::new(),
            is_veg: true,
            category: "Mains".to_string(),
            restaurant_id: RestaurantId(9),
            restaurant_name: None,
            in_stock: Some(true),
        };

        cart.add_item(&item);
        cart.add_item(&item);

        let breakdown = compute_breakdown(&cart)?;

        assert_eq!(breakdown.item_total, 210);
        assert_eq!(breakdown.tax, 11);
        assert_eq!(breakdown.grand_total, 256);

        Ok(())
    }

    #[test]
    fn rupees_are_inr() {
        assert_eq!(rupees(245), Money::from_major(245, iso::INR));
    }
}
