//! In-process mock of the cart/product backend used by the integration
//! tests. State is inspectable so tests can assert on what the client
//! actually sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tokio::sync::Mutex;

use shared::models::{Cart, CartItem, CartItemInput, CartStatus, Product};

pub type SharedBackend = Arc<Mutex<Backend>>;

#[derive(Default)]
pub struct Backend {
    pub carts: Vec<Cart>,
    pub products: Vec<Product>,
    next_cart_id: i64,
    next_item_id: i64,
    /// POSTs to any `/carts/{id}/items`
    pub item_posts: u32,
    /// POSTs to any `/carts/{id}/checkout`
    pub checkout_calls: u32,
    /// When set, `GET /carts` answers 500 with a message payload
    pub fail_cart_reads: bool,
    /// Fail this many `GET /carts` calls, then recover
    pub fail_next_n_cart_reads: u32,
    /// When set, `GET /products` answers 500 with a message payload
    pub fail_product_reads: bool,
}

impl Backend {
    pub fn alloc_cart_id(&mut self) -> i64 {
        self.next_cart_id += 1;
        self.next_cart_id
    }

    pub fn alloc_item_id(&mut self) -> i64 {
        self.next_item_id += 1;
        self.next_item_id
    }
}

/// Seed one cart with the given `(product_id, name, price_cents, quantity)`
/// lines. Returns the cart id and the allocated item ids.
pub async fn seed_cart(
    state: &SharedBackend,
    status: CartStatus,
    items: &[(i64, &str, i64, i32)],
) -> (i64, Vec<i64>) {
    let mut backend = state.lock().await;
    let cart_id = backend.alloc_cart_id();
    let now = Utc::now();
    let mut cart = Cart {
        id: cart_id,
        status,
        created_at: now,
        updated_at: now,
        items: Vec::new(),
    };
    let mut item_ids = Vec::new();
    for &(product_id, name, price_cents, quantity) in items {
        let id = backend.alloc_item_id();
        item_ids.push(id);
        cart.items.push(CartItem {
            id,
            product_id: Some(product_id),
            product_name: name.to_string(),
            quantity,
            unit_price: Decimal::new(price_cents, 2),
            cart_id,
        });
    }
    backend.carts.push(cart);
    (cart_id, item_ids)
}

/// Seed catalog products as `(id, name, price_cents, category)`
pub async fn seed_products(state: &SharedBackend, products: &[(i64, &str, i64, &str)]) {
    let mut backend = state.lock().await;
    for &(id, name, price_cents, category) in products {
        backend.products.push(Product {
            id,
            name: name.to_string(),
            price: Decimal::new(price_cents, 2),
            category: category.to_string(),
            image: format!("{name}.jpg"),
        });
    }
}

/// Route client traces into the test output when RUST_LOG is set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Bind the mock backend on an ephemeral port and serve it in the
/// background. Returns the shared state and the base URL.
pub async fn spawn_backend() -> (SharedBackend, String) {
    init_tracing();
    let state: SharedBackend = Arc::new(Mutex::new(Backend::default()));
    let app = Router::new()
        .route("/carts", get(list_carts).post(create_cart))
        .route("/carts/{cart_id}/items", post(upsert_item).delete(clear_items))
        .route("/carts/{cart_id}/checkout", post(checkout))
        .route("/products", get(list_products))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (state, base_url)
}

async fn list_carts(
    State(state): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut backend = state.lock().await;
    let transient_failure = backend.fail_next_n_cart_reads > 0;
    if transient_failure {
        backend.fail_next_n_cart_reads -= 1;
    }
    if backend.fail_cart_reads || transient_failure {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "database unavailable"})),
        )
            .into_response();
    }
    let want_active = params.get("status").is_some_and(|s| s == "active");
    let carts: Vec<Cart> = backend
        .carts
        .iter()
        .filter(|cart| !want_active || cart.is_active())
        .cloned()
        .collect();
    Json(carts).into_response()
}

async fn create_cart(State(state): State<SharedBackend>) -> Json<Cart> {
    let mut backend = state.lock().await;
    let now = Utc::now();
    let cart = Cart {
        id: backend.alloc_cart_id(),
        status: CartStatus::Active,
        created_at: now,
        updated_at: now,
        items: Vec::new(),
    };
    backend.carts.push(cart.clone());
    Json(cart)
}

async fn upsert_item(
    State(state): State<SharedBackend>,
    Path(cart_id): Path<i64>,
    Json(input): Json<CartItemInput>,
) -> Response {
    let mut backend = state.lock().await;
    backend.item_posts += 1;
    let next_item_id = backend.alloc_item_id();
    let Some(cart) = backend.carts.iter_mut().find(|c| c.id == cart_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "cart not found"})),
        )
            .into_response();
    };

    // Merge by product id, the way the real backend does
    if let Some(existing) = cart
        .items
        .iter_mut()
        .find(|i| input.product_id.is_some() && i.product_id == input.product_id)
    {
        existing.quantity = input.quantity;
        if let Some(name) = input.product_name {
            existing.product_name = name;
        }
        if let Some(price) = input.unit_price {
            existing.unit_price = price;
        }
        return Json(existing.clone()).into_response();
    }

    let item = CartItem {
        id: next_item_id,
        product_id: input.product_id,
        product_name: input
            .product_name
            .unwrap_or_else(|| format!("product-{}", input.product_id.unwrap_or_default())),
        quantity: input.quantity,
        unit_price: input.unit_price.unwrap_or(Decimal::new(100, 2)),
        cart_id,
    };
    cart.items.push(item.clone());
    Json(item).into_response()
}

async fn clear_items(State(state): State<SharedBackend>, Path(cart_id): Path<i64>) -> Response {
    let mut backend = state.lock().await;
    let Some(cart) = backend.carts.iter_mut().find(|c| c.id == cart_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "cart not found"})),
        )
            .into_response();
    };
    cart.items.clear();
    Json(json!({"message": "cleared"})).into_response()
}

async fn checkout(State(state): State<SharedBackend>, Path(cart_id): Path<i64>) -> Response {
    let mut backend = state.lock().await;
    backend.checkout_calls += 1;
    let Some(cart) = backend.carts.iter_mut().find(|c| c.id == cart_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "cart not found"})),
        )
            .into_response();
    };
    cart.status = CartStatus::Completed;
    Json(json!({"message": "checkout completed"})).into_response()
}

async fn list_products(State(state): State<SharedBackend>) -> Response {
    let backend = state.lock().await;
    if backend.fail_product_reads {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "catalog unavailable"})),
        )
            .into_response();
    }
    Json(backend.products.clone()).into_response()
}
