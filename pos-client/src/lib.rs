//! POS Client - terminal-side client for the cart/product backend
//!
//! Mirrors the server-owned active cart through an invalidate-on-write read
//! model, keeps a time-boxed product catalog cache, and holds the
//! terminal-local UI state.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod terminal;
pub mod watcher;

pub use cart::CartClient;
pub use catalog::CatalogClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpClient;
pub use store::{PaymentPhase, StateStore, StoreError, ALL_CATEGORIES};
pub use terminal::PosTerminal;
pub use watcher::CartWatcher;
