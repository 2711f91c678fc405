//! Terminal session
//!
//! Wires the catalog client, cart client, and local state store together and
//! receives the user intents dispatched by the presentation layer. Derived
//! totals are recomputed from current state on every call, never cached.

use std::sync::Arc;

use tokio::sync::RwLock;

use shared::models::Product;
use shared::totals::{self, CartItemWithProduct, CartTotals};

use crate::store::ALL_CATEGORIES;
use crate::{ApiResult, CartClient, CatalogClient, ClientConfig, HttpClient, StateStore};

/// Everything the cart panel renders: enriched lines plus derived totals
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartItemWithProduct>,
    pub totals: CartTotals,
}

/// One terminal session against the backend
pub struct PosTerminal {
    catalog: CatalogClient,
    cart: CartClient,
    store: Arc<RwLock<StateStore>>,
}

impl PosTerminal {
    pub fn new(config: &ClientConfig, store: StateStore) -> ApiResult<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            catalog: CatalogClient::new(http.clone()),
            cart: CartClient::new(http),
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// Shared handle to the state store (read ownership stays with the
    /// presentation layer; writes go through the intent methods below)
    pub fn store(&self) -> Arc<RwLock<StateStore>> {
        self.store.clone()
    }

    pub fn cart(&self) -> &CartClient {
        &self.cart
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Pull the server's cart into the local store. The server's view wins
    /// over the persisted local copy; a standing connection error is cleared
    /// on success and replaced on failure.
    pub async fn refresh_cart(&self) -> ApiResult<()> {
        match self.cart.fetch_active_cart().await {
            Ok(items) => {
                let mut store = self.store.write().await;
                store.sync_cart_items(items);
                store.clear_connection_error();
                Ok(())
            }
            Err(err) => {
                self.store.write().await.set_connection_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Add one unit of a product to the cart.
    ///
    /// Failures are logged, not surfaced; the UI stays silently out of sync
    /// until the next poll.
    pub async fn add_product(&self, product_id: i64) {
        if let Err(err) = self.cart.add_item(product_id).await {
            tracing::warn!(product_id, error = %err, "add to cart failed");
            return;
        }
        let _ = self.refresh_cart().await;
    }

    /// Change a line item's quantity. Same silent failure policy as
    /// [`Self::add_product`].
    pub async fn change_quantity(&self, item_id: i64, quantity: i32) {
        if let Err(err) = self.cart.update_item_quantity(item_id, quantity).await {
            tracing::warn!(item_id, quantity, error = %err, "quantity update failed");
            return;
        }
        let _ = self.refresh_cart().await;
    }

    /// Remove every line from the cart
    pub async fn clear_cart(&self) {
        if let Err(err) = self.cart.clear().await {
            tracing::warn!(error = %err, "clear cart failed");
            return;
        }
        let _ = self.refresh_cart().await;
    }

    /// Run the checkout round trip: `Idle -> InProgress -> Idle`.
    ///
    /// Exactly one request decides the outcome. The error is returned so the
    /// presentation layer can raise its blocking alert; a payment already in
    /// progress makes this a no-op.
    pub async fn pay(&self) -> ApiResult<()> {
        if !self.store.write().await.begin_payment() {
            tracing::debug!("payment already in progress, ignoring");
            return Ok(());
        }

        let result = self.cart.checkout().await;

        let mut store = self.store.write().await;
        store.end_payment();
        if result.is_ok() {
            store.clear_cart_items();
        }
        drop(store);

        if let Err(err) = &result {
            tracing::warn!(error = %err, "checkout failed");
        }
        result
    }

    /// Manual recovery action from the connection-error screen
    pub async fn reload(&self) -> ApiResult<()> {
        self.store.write().await.clear_connection_error();
        self.refresh_cart().await
    }

    /// Catalog filtered by the store's active category and search term
    pub async fn visible_products(&self) -> ApiResult<Vec<Product>> {
        let products = self.catalog.products().await?;
        let store = self.store.read().await;
        Ok(filter_products(
            products,
            store.active_category(),
            store.search_term(),
        ))
    }

    /// Current cart lines enriched with catalog data, plus derived totals.
    ///
    /// A catalog read failure leaves the lines unenriched rather than
    /// failing the whole view; there is no fallback screen for it.
    pub async fn cart_view(&self) -> CartView {
        let products = match self.catalog.products().await {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(error = %err, "catalog unavailable, rendering bare cart lines");
                Vec::new()
            }
        };
        let store = self.store.read().await;
        CartView {
            lines: totals::enrich(store.cart_items(), &products),
            totals: totals::totals(store.cart_items()),
        }
    }
}

/// Keep products matching the category filter and the case-insensitive
/// search term
fn filter_products(products: Vec<Product>, category: &str, search: &str) -> Vec<Product> {
    let needle = search.to_lowercase();
    products
        .into_iter()
        .filter(|product| {
            (category == ALL_CATEGORIES || product.category == category)
                && product.name.to_lowercase().contains(&needle)
        })
        .collect()
}
