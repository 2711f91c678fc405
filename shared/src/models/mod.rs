//! Data models
//!
//! Shared between the terminal client and the backend (via API).
//! All IDs are `i64`, matching the backend's integer primary keys.

pub mod cart;
pub mod product;

// Re-exports
pub use cart::*;
pub use product::*;
