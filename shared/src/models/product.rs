//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Owned by the backend catalog; immutable from the terminal's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in currency units (plain JSON number on the wire)
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category tag used by the terminal's category filter
    pub category: String,
    /// Image reference, resolved by the presentation layer
    pub image: String,
}
