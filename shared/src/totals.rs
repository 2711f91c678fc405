//! Cart aggregation
//!
//! Pure derivation of display data from the current line items and catalog:
//! line enrichment, subtotal, tax, and grand total. Referentially
//! transparent, so it can run on every render without side effects; totals
//! are never cached.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CartItem, Product};

/// Fixed tax surcharge applied to the subtotal (16%)
pub const TAX_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// Line item enriched with its catalog product, when the id matches
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemWithProduct {
    pub item: CartItem,
    /// Absent when the line has no product reference or the catalog does
    /// not contain it
    pub product: Option<Product>,
}

/// Derived cart totals. Tax is kept exact here; rounding happens only at
/// display time, so `total == subtotal + tax` holds as an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Join line items against the product catalog by product id.
pub fn enrich(items: &[CartItem], products: &[Product]) -> Vec<CartItemWithProduct> {
    items
        .iter()
        .map(|item| CartItemWithProduct {
            item: item.clone(),
            product: item
                .product_id
                .and_then(|pid| products.iter().find(|p| p.id == pid).cloned()),
        })
        .collect()
}

/// Compute subtotal, tax, and grand total for the given line items.
pub fn totals(items: &[CartItem]) -> CartTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum();
    let tax = subtotal * TAX_RATE;
    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Format a money value for display, e.g. `$12.50`
///
/// Two decimal places, midpoint rounded away from zero.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}
