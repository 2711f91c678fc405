//! Product catalog client
//!
//! The catalog is small and read-only from the terminal's view, so a simple
//! time-boxed cache is enough: fresh for 60 seconds after a fetch, evicted
//! after an hour of disuse. No LRU or size bound.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use shared::models::Product;

use crate::{ApiResult, HttpClient};

/// How long a fetched catalog counts as fresh
pub const FRESH_FOR: Duration = Duration::from_secs(60);

/// Idle time after which a cached catalog is no longer usable at all.
/// Measured from the last access, not the fetch.
pub const EVICT_AFTER: Duration = Duration::from_secs(3600);

/// Fresh enough to serve without asking the network, keyed to fetch time
fn is_fresh(fetch_age: Duration, fresh_for: Duration) -> bool {
    fetch_age < fresh_for
}

/// Still inside the eviction horizon, keyed to the last access
fn is_usable(idle_age: Duration, evict_after: Duration) -> bool {
    idle_age < evict_after
}

#[derive(Debug)]
struct CachedCatalog {
    products: Vec<Product>,
    fetched_at: Instant,
    last_used_at: Instant,
}

impl CachedCatalog {
    fn new(products: Vec<Product>) -> Self {
        let now = Instant::now();
        Self {
            products,
            fetched_at: now,
            last_used_at: now,
        }
    }

    fn is_fresh(&self, fresh_for: Duration) -> bool {
        is_fresh(self.fetched_at.elapsed(), fresh_for)
    }

    fn is_usable(&self, evict_after: Duration) -> bool {
        is_usable(self.last_used_at.elapsed(), evict_after)
    }

    fn touch(&mut self) {
        self.last_used_at = Instant::now();
    }
}

/// Client for the read-mostly product catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: HttpClient,
    cache: Arc<RwLock<Option<CachedCatalog>>>,
    fresh_for: Duration,
    evict_after: Duration,
}

impl CatalogClient {
    pub fn new(http: HttpClient) -> Self {
        Self::with_windows(http, FRESH_FOR, EVICT_AFTER)
    }

    /// Client with custom staleness/eviction windows
    pub fn with_windows(http: HttpClient, fresh_for: Duration, evict_after: Duration) -> Self {
        Self {
            http,
            cache: Arc::new(RwLock::new(None)),
            fresh_for,
            evict_after,
        }
    }

    /// Current product list: served from cache while fresh, refetched once
    /// stale. When a refetch fails, a stale copy inside the eviction horizon
    /// is served instead of the error.
    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.as_mut() {
                if cached.is_fresh(self.fresh_for) {
                    cached.touch();
                    return Ok(cached.products.clone());
                }
            }
        }

        match self.http.get::<Vec<Product>>("/products", &[]).await {
            Ok(products) => {
                *self.cache.write().await = Some(CachedCatalog::new(products.clone()));
                Ok(products)
            }
            Err(err) => {
                let mut cache = self.cache.write().await;
                match cache.as_mut() {
                    Some(cached) if cached.is_usable(self.evict_after) => {
                        tracing::warn!(error = %err, "catalog refresh failed, serving stale copy");
                        cached.touch();
                        Ok(cached.products.clone())
                    }
                    _ => {
                        *cache = None;
                        Err(err)
                    }
                }
            }
        }
    }

    /// Drop any cached catalog
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}
