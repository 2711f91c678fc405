//! Local UI state store
//!
//! Transient terminal state (category filter, search term, payment phase,
//! connection error) plus a locally persisted copy of the cart line items.
//! The persisted copy survives a restart but is never the source of truth:
//! the server's active cart wins once it is fetched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::models::CartItem;

/// Category filter value meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

const STORAGE_FILE: &str = "pos-storage.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checkout round-trip phase
///
/// A single request/response decides the outcome; there are no intermediate
/// states such as partial payment or retry-with-backoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentPhase {
    #[default]
    Idle,
    InProgress,
}

/// Persisted slice of the store: only the cart-items copy is written out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedState {
    cart_items: Vec<CartItem>,
}

/// Terminal-local state
///
/// One instance per terminal session, passed down explicitly to the
/// components that read or write it.
#[derive(Debug)]
pub struct StateStore {
    file_path: Option<PathBuf>,
    active_category: String,
    search_term: String,
    payment: PaymentPhase,
    connection_error: Option<String>,
    cart_items: Vec<CartItem>,
}

impl StateStore {
    fn with_items(file_path: Option<PathBuf>, cart_items: Vec<CartItem>) -> Self {
        Self {
            file_path,
            active_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
            payment: PaymentPhase::Idle,
            connection_error: None,
            cart_items,
        }
    }

    /// In-memory store without persistence
    pub fn in_memory() -> Self {
        Self::with_items(None, Vec::new())
    }

    /// Store backed by `{data_dir}/pos-storage.json`, loading any
    /// previously persisted cart items
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file_path = data_dir.join(STORAGE_FILE);
        let cart_items = if file_path.exists() {
            let raw = std::fs::read_to_string(&file_path)?;
            serde_json::from_str::<PersistedState>(&raw)?.cart_items
        } else {
            Vec::new()
        };
        Ok(Self::with_items(Some(file_path), cart_items))
    }

    /// Write the persisted slice, best effort
    fn persist(&self) {
        let Some(path) = &self.file_path else {
            return;
        };
        let state = PersistedState {
            cart_items: self.cart_items.clone(),
        };
        let result = serde_json::to_string_pretty(&state)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(path, json));
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist cart items");
        }
    }

    // ========== UI state ==========

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn set_active_category(&mut self, category: impl Into<String>) {
        self.active_category = category.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    pub fn set_connection_error(&mut self, message: impl Into<String>) {
        self.connection_error = Some(message.into());
    }

    pub fn clear_connection_error(&mut self) {
        self.connection_error = None;
    }

    // ========== Payment phase ==========

    pub fn payment(&self) -> PaymentPhase {
        self.payment
    }

    /// `Idle -> InProgress`; returns false when a payment is already running
    pub fn begin_payment(&mut self) -> bool {
        if self.payment == PaymentPhase::InProgress {
            return false;
        }
        self.payment = PaymentPhase::InProgress;
        true
    }

    /// Back to `Idle`, on success and failure alike
    pub fn end_payment(&mut self) {
        self.payment = PaymentPhase::Idle;
    }

    // ========== Cart items copy ==========

    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    /// Replace the local copy with the server's view
    pub fn sync_cart_items(&mut self, items: Vec<CartItem>) {
        self.cart_items = items;
        self.persist();
    }

    pub fn add_cart_item(&mut self, item: CartItem) {
        self.cart_items.push(item);
        self.persist();
    }

    pub fn remove_cart_item(&mut self, item_id: i64) {
        self.cart_items.retain(|item| item.id != item_id);
        self.persist();
    }

    pub fn clear_cart_items(&mut self) {
        self.cart_items.clear();
        self.persist();
    }
}
