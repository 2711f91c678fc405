//! Cart synchronization client
//!
//! The server owns the cart; this client mirrors it through a read-model
//! cache that every mutation invalidates, so the next read always goes to
//! the network. No client-side locking or versioning exists: two rapid
//! mutations can read the same stale snapshot and the second write wins.

use std::sync::Arc;

use tokio::sync::RwLock;

use shared::models::{Cart, CartItem, CartItemInput};

use crate::{ApiError, ApiResult, HttpClient};

/// Cached cart read-model; `None` means invalidated
#[derive(Debug, Default)]
struct ReadModel {
    items: Option<Vec<CartItem>>,
}

/// Client for the server-owned cart resource
#[derive(Debug, Clone)]
pub struct CartClient {
    http: HttpClient,
    cache: Arc<RwLock<ReadModel>>,
}

impl CartClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            cache: Arc::new(RwLock::new(ReadModel::default())),
        }
    }

    /// The last element of the server's active-cart list is taken as "the"
    /// active cart. The backend is trusted to return at most one truly
    /// active cart, most recent last.
    fn select_active(mut carts: Vec<Cart>) -> Option<Cart> {
        carts.pop()
    }

    async fn fetch_active(&self) -> ApiResult<Option<Cart>> {
        let carts: Vec<Cart> = self.http.get("/carts", &[("status", "active")]).await?;
        Ok(Self::select_active(carts))
    }

    /// Fetch the active cart's line items; empty when no cart is active.
    /// Refreshes the read-model cache on success.
    pub async fn fetch_active_cart(&self) -> ApiResult<Vec<CartItem>> {
        let items = match self.fetch_active().await? {
            Some(cart) => cart.items,
            None => Vec::new(),
        };
        self.cache.write().await.items = Some(items.clone());
        Ok(items)
    }

    /// Line items from the read-model cache, `None` when invalidated
    pub async fn cached_items(&self) -> Option<Vec<CartItem>> {
        self.cache.read().await.items.clone()
    }

    /// Force the next read to hit the network
    pub async fn invalidate(&self) {
        self.cache.write().await.items = None;
    }

    /// Add one unit of a product, creating a cart when none is active.
    ///
    /// Lines are appended as-is; merging duplicates for the same product is
    /// the backend's contract, not enforced here.
    pub async fn add_item(&self, product_id: i64) -> ApiResult<()> {
        let cart = match self.fetch_active().await? {
            Some(cart) => cart,
            None => self.http.post_empty::<Cart>("/carts").await?,
        };
        let _: CartItem = self
            .http
            .post(
                &format!("/carts/{}/items", cart.id),
                &CartItemInput::add(product_id),
            )
            .await?;
        self.invalidate().await;
        Ok(())
    }

    /// Resubmit a line with a new quantity.
    ///
    /// The full denormalized line data comes from a fresh cart fetch. An
    /// unknown item id (e.g. removed by a concurrent update) is a silent
    /// no-op; no network write is issued.
    pub async fn update_item_quantity(&self, item_id: i64, quantity: i32) -> ApiResult<()> {
        let Some(cart) = self.fetch_active().await? else {
            return Ok(());
        };
        let Some(item) = cart.items.iter().find(|i| i.id == item_id) else {
            tracing::debug!(item_id, "quantity update for unknown line item, skipping");
            return Ok(());
        };
        let _: CartItem = self
            .http
            .post(
                &format!("/carts/{}/items", cart.id),
                &CartItemInput::requantify(item, quantity),
            )
            .await?;
        self.invalidate().await;
        Ok(())
    }

    /// Delete every line of the active cart; no-op when none is active.
    pub async fn clear(&self) -> ApiResult<()> {
        if let Some(cart) = self.fetch_active().await? {
            self.http.delete(&format!("/carts/{}/items", cart.id)).await?;
            self.invalidate().await;
        }
        Ok(())
    }

    /// Finalize the active cart.
    ///
    /// Fails with [`ApiError::NoActiveCart`] before issuing any checkout
    /// call when no cart is active. The backend treats checkout as
    /// finalizing the cart; no separate clear follows.
    pub async fn checkout(&self) -> ApiResult<()> {
        let cart = self.fetch_active().await?.ok_or(ApiError::NoActiveCart)?;
        tracing::debug!(cart_id = cart.id, "processing checkout");
        let _: serde_json::Value = self
            .http
            .post_empty(&format!("/carts/{}/checkout", cart.id))
            .await?;
        self.invalidate().await;
        Ok(())
    }
}
