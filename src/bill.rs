//! Bill
//!
//! Terminal rendering of the cart page's "bill details": one row per cart line followed by the
//! fee and tax summary.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{PricingBreakdown, PricingError, compute_breakdown, rupees, tax_rate},
};

/// Errors that can occur when rendering a bill.
#[derive(Debug, Error)]
pub enum BillError {
    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("IO error")]
    IO,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BillLine {
    name: String,
    is_veg: bool,
    quantity: u32,
    unit_price: u64,
    subtotal: u64,
}

/// Snapshot of a cart and its charges, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    lines: Vec<BillLine>,
    breakdown: PricingBreakdown,
}

impl Bill {
    /// Price `cart` and capture its lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the totals overflow.
    pub fn for_cart(cart: &Cart) -> Result<Self, PricingError> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| BillLine {
                name: line.item().name.clone(),
                is_veg: line.item().is_veg,
                quantity: line.quantity(),
                unit_price: line.item().price,
                subtotal: line.subtotal(),
            })
            .collect();

        Ok(Bill {
            lines,
            breakdown: compute_breakdown(cart)?,
        })
    }

    /// Charges on this bill.
    pub fn breakdown(&self) -> PricingBreakdown {
        self.breakdown
    }

    /// Whether the bill has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Print the bill.
    ///
    /// # Errors
    ///
    /// Returns [`BillError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), BillError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price", "Subtotal"]);

        for line in &self.lines {
            builder.push_record([
                if line.is_veg { "veg" } else { "non-veg" }.to_string(),
                line.name.clone(),
                line.quantity.to_string(),
                rupees(line.unit_price).to_string(),
                rupees(line.subtotal).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| BillError::IO)?;

        write_summary(&mut out, self.breakdown)
    }
}

fn write_summary(out: &mut impl io::Write, breakdown: PricingBreakdown) -> Result<(), BillError> {
    let tax_label = format!("GST ({}%)", (tax_rate() * Decimal::ONE_HUNDRED).normalize());

    let rows = [
        ("Item Total", breakdown.item_total),
        ("Delivery Fee", breakdown.delivery_fee),
        ("Platform Fee", breakdown.platform_fee),
        (tax_label.as_str(), breakdown.tax),
        ("To Pay", breakdown.grand_total),
    ];

    let mut builder = Builder::default();

    for (label, amount) in rows {
        builder.push_record([label.to_string(), rupees(amount).to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::blank());
    table.modify(Columns::one(1), Alignment::right());
    table.modify(Rows::last(), Color::BOLD);

    writeln!(out, "{table}\n").map_err(|_err| BillError::IO)
}
