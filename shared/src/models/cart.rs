//! Cart and Line Item Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cart lifecycle status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Active,
    Completed,
    /// Catch-all for statuses this client does not act on
    #[serde(untagged)]
    Other(String),
}

/// Cart entity
///
/// Server-owned. At most one cart is active per terminal; the client mirrors
/// it through the cart synchronization client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub status: CartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_active(&self) -> bool {
        self.status == CartStatus::Active
    }
}

/// One product-quantity-price record within a cart
///
/// `product_name` and `unit_price` are denormalized from the catalog at the
/// time the line was created. Quantity is positive by convention but not
/// clamped here; decrements below 1 are representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub cart_id: i64,
}

/// Upsert payload for `POST /carts/{cart_id}/items`
///
/// Quantity updates resend the full denormalized line, sourced from the
/// previous cart fetch rather than from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: i32,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub unit_price: Option<Decimal>,
}

impl CartItemInput {
    /// Payload for adding one unit of a product; the backend fills in the
    /// denormalized name and price from the catalog.
    pub fn add(product_id: i64) -> Self {
        Self {
            product_id: Some(product_id),
            product_name: None,
            quantity: 1,
            unit_price: None,
        }
    }

    /// Payload for resubmitting an existing line with a new quantity.
    pub fn requantify(item: &CartItem, quantity: i32) -> Self {
        Self {
            product_id: item.product_id,
            product_name: Some(item.product_name.clone()),
            quantity,
            unit_price: Some(item.unit_price),
        }
    }
}
