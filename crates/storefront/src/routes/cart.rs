//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart lives in the session's shop; see [`crate::services::shop`].

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use folio_core::{BookId, Cart, CartItem};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentShop;
use crate::services::shop::{
    EditOutcome, add_to_cart, remove_item, toggle_cart, update_quantity,
};
use crate::state::AppState;

/// HTMX event fired whenever the cart contents change.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image_url: String,
    pub price: String,
    pub quantity: u32,
    pub pending: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartItemView {
    fn new(item: &CartItem, pending: bool) -> Self {
        Self {
            id: item.id().to_string(),
            title: item.book.title.clone(),
            author: item.book.author.clone(),
            cover_image_url: item.book.cover_image_url.clone(),
            price: item.book.price.to_string(),
            quantity: item.quantity,
            pending,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, cart.is_pending(item.id())))
                .collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub book_id: String,
}

/// Update cart form data.
///
/// The quantity arrives as typed by the user and is parsed by the handler.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub book_id: String,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub book_id: String,
}

/// Cart count badge fragment template (for HTMX).
///
/// With `oob` set the badge rides along with another fragment as an
/// out-of-band swap.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
    pub oob: bool,
}

/// Cart panel fragment template (for HTMX). Renders nothing while closed.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: Option<CartView>,
    pub badge: Option<CartCountTemplate>,
}

impl CartPanelTemplate {
    /// Panel for the current cart, without a badge.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self {
            cart: cart.is_open().then(|| CartView::from(cart)),
            badge: None,
        }
    }

    /// Panel for the current cart, refreshing the header badge as well.
    #[must_use]
    pub fn with_badge(cart: &Cart) -> Self {
        Self {
            badge: Some(CartCountTemplate {
                count: cart.item_count(),
                oob: true,
            }),
            ..Self::for_cart(cart)
        }
    }
}

/// Parse a typed quantity. Anything but a whole number is rejected.
fn parse_quantity(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {raw:?}")))
}

/// Map a delayed edit outcome to the handler result.
///
/// A skipped edit still renders the panel; a failed one is a server error.
fn edit_result(outcome: EditOutcome, id: &BookId) -> Result<()> {
    match outcome {
        EditOutcome::Applied => Ok(()),
        EditOutcome::AlreadyPending => {
            tracing::debug!(book_id = %id, "Edit skipped, item already pending");
            Ok(())
        }
        EditOutcome::Failed => Err(AppError::Internal(format!("cart edit for {id} failed"))),
    }
}

/// Cart panel fragment (HTMX).
#[instrument(skip_all)]
pub async fn show(CurrentShop(shop): CurrentShop) -> CartPanelTemplate {
    let guard = shop.lock().await;
    CartPanelTemplate::for_cart(&guard.cart)
}

/// Open or close the cart panel (HTMX).
#[instrument(skip_all)]
pub async fn toggle(CurrentShop(shop): CurrentShop) -> CartPanelTemplate {
    let open = toggle_cart(&shop).await;
    tracing::debug!(open, "Cart panel toggled");

    let guard = shop.lock().await;
    CartPanelTemplate::for_cart(&guard.cart)
}

/// Add one copy of a catalog book to the cart (HTMX).
///
/// Returns the new count badge and fires [`CART_UPDATED_EVENT`] so an open
/// panel re-renders.
#[instrument(skip_all)]
pub async fn add(
    CurrentShop(shop): CurrentShop,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = BookId::new(form.book_id);
    let count = add_to_cart(&shop, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;

    tracing::debug!(book_id = %id, count, "Added to cart");
    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate { count, oob: false },
    )
        .into_response())
}

/// Set the quantity of a cart item (HTMX).
///
/// The change lands after the configured delay. Zero or less removes the item.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    CurrentShop(shop): CurrentShop,
    Form(form): Form<UpdateCartForm>,
) -> Result<CartPanelTemplate> {
    let quantity = parse_quantity(&form.quantity)?;
    let id = BookId::new(form.book_id);

    let outcome = update_quantity(
        Arc::clone(&shop),
        id.clone(),
        quantity,
        state.config().cart_update_delay,
    )
    .await;
    edit_result(outcome, &id)?;

    let guard = shop.lock().await;
    Ok(CartPanelTemplate::with_badge(&guard.cart))
}

/// Remove an item from the cart (HTMX).
///
/// The removal lands after the configured delay.
#[instrument(skip_all)]
pub async fn remove(
    State(state): State<AppState>,
    CurrentShop(shop): CurrentShop,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<CartPanelTemplate> {
    let id = BookId::new(form.book_id);

    let outcome = remove_item(
        Arc::clone(&shop),
        id.clone(),
        state.config().cart_update_delay,
    )
    .await;
    edit_result(outcome, &id)?;

    let guard = shop.lock().await;
    Ok(CartPanelTemplate::with_badge(&guard.cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip_all)]
pub async fn count(CurrentShop(shop): CurrentShop) -> CartCountTemplate {
    let count = shop.lock().await.cart.item_count();
    CartCountTemplate { count, oob: false }
}
