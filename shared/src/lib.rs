//! Shared types for the POS terminal
//!
//! Wire models exchanged with the cart/product backend and the pure cart
//! aggregation used to derive display totals.

pub mod models;
pub mod totals;

// Re-exports
pub use serde::{Deserialize, Serialize};
