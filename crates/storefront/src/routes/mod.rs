//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Page shell
//! GET  /health                 - Health check
//!
//! # Catalog (HTMX fragments)
//! GET  /catalog                - Current catalog fragment (no fetch)
//! POST /catalog/refresh        - Fetch a fresh catalog, return fragment
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel (empty while closed)
//! POST /cart/toggle            - Open or close the panel
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity after a delay (returns panel)
//! POST /cart/remove            - Remove item after a delay (returns panel)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod catalog;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::show))
        .route("/refresh", post(catalog::refresh))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/toggle", post(cart::toggle))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
}
