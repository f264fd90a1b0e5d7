//! Per-session shop state.
//!
//! Each browser session owns one [`Shop`]: the catalog from its last fetch and
//! its cart. Shops live only in memory, in a `moka` cache keyed by the shopper
//! id stored in the session cookie, and are evicted after the same idle period
//! as the session itself.
//!
//! Slow work never runs under the shop lock. A catalog refresh flips the state to
//! `Loading` and releases the lock before calling out, and a refresh arriving
//! while another is in flight gets `Loading` back instead of starting a second
//! request. Cart removals and quantity updates mark the item pending, sleep for
//! the configured delay, then re-lock to apply. Both run on spawned tasks so a
//! dropped request cannot leave a shop stuck in `Loading` or an item stuck
//! pending.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use folio_core::{Book, BookId, Cart};
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::catalog::CatalogError;

/// Upper bound on concurrently tracked shops.
pub const MAX_SHOPS: u64 = 10_000;

/// Where the catalog of a shop stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// No fetch has been started yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready(Vec<Book>),
    /// The last fetch failed. Details are logged, not kept.
    Failed,
}

impl CatalogState {
    /// Books of a successful fetch; empty otherwise.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        match self {
            Self::Ready(books) => books,
            Self::Idle | Self::Loading | Self::Failed => &[],
        }
    }
}

/// Catalog and cart of one browser session.
#[derive(Debug, Default)]
pub struct Shop {
    pub catalog: CatalogState,
    pub cart: Cart,
}

impl Shop {
    /// Look up a book in the current catalog.
    #[must_use]
    pub fn find_book(&self, id: &BookId) -> Option<&Book> {
        self.catalog.books().iter().find(|book| &book.id == id)
    }
}

/// A shop shared between the requests of one session.
pub type SharedShop = Arc<Mutex<Shop>>;

/// In-memory shops keyed by shopper id.
#[derive(Clone)]
pub struct ShopStore {
    shops: Cache<Uuid, SharedShop>,
}

impl ShopStore {
    /// Create a store whose shops expire after `idle_timeout` without access.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        let shops = Cache::builder()
            .max_capacity(MAX_SHOPS)
            .time_to_idle(idle_timeout)
            .build();

        Self { shops }
    }

    /// Get the shop for `shopper`, creating an empty one on first use.
    pub async fn get(&self, shopper: Uuid) -> SharedShop {
        self.shops
            .get_with(shopper, async { Arc::new(Mutex::new(Shop::default())) })
            .await
    }
}

/// Result of a delayed cart edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit ran after the delay.
    Applied,
    /// Another edit on the same item was still in flight; nothing changed.
    AlreadyPending,
    /// The edit task died before applying. The pending mark is cleared.
    Failed,
}

/// Replace the catalog with the result of `fetch`.
///
/// Returns the resulting state. If a fetch is already in flight, returns
/// [`CatalogState::Loading`] without polling `fetch`.
pub async fn refresh_catalog<F>(shop: SharedShop, fetch: F) -> CatalogState
where
    F: Future<Output = Result<Vec<Book>, CatalogError>> + Send + 'static,
{
    {
        let mut guard = shop.lock().await;
        if guard.catalog == CatalogState::Loading {
            tracing::debug!("Catalog fetch already in flight");
            return CatalogState::Loading;
        }
        guard.catalog = CatalogState::Loading;
    }

    let task_shop = Arc::clone(&shop);
    let task = tokio::spawn(async move {
        let next = match fetch.await {
            Ok(books) => CatalogState::Ready(books),
            Err(e) => {
                tracing::error!(error = %e, "Catalog fetch failed");
                CatalogState::Failed
            }
        };
        task_shop.lock().await.catalog = next.clone();
        next
    });

    match task.await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Catalog fetch task aborted");
            shop.lock().await.catalog = CatalogState::Failed;
            CatalogState::Failed
        }
    }
}

/// Add one copy of the catalog book `id` to the cart.
///
/// Returns the new cart item count, or `None` if the book is not in the
/// current catalog.
pub async fn add_to_cart(shop: &SharedShop, id: &BookId) -> Option<u64> {
    let mut guard = shop.lock().await;
    let book = guard.find_book(id)?.clone();
    guard.cart.add(book);
    Some(guard.cart.item_count())
}

/// Remove `id` from the cart after `delay`.
pub async fn remove_item(shop: SharedShop, id: BookId, delay: Duration) -> EditOutcome {
    delayed_edit(shop, id, delay, |cart, id| cart.remove(id)).await
}

/// Set the quantity of `id` after `delay`. Quantities of zero or less remove it.
pub async fn update_quantity(
    shop: SharedShop,
    id: BookId,
    quantity: i64,
    delay: Duration,
) -> EditOutcome {
    delayed_edit(shop, id, delay, move |cart, id| cart.set_quantity(id, quantity)).await
}

/// Flip the cart panel. Returns whether it is now open.
pub async fn toggle_cart(shop: &SharedShop) -> bool {
    shop.lock().await.cart.toggle_visibility()
}

async fn delayed_edit<F>(shop: SharedShop, id: BookId, delay: Duration, apply: F) -> EditOutcome
where
    F: FnOnce(&mut Cart, &BookId) + Send + 'static,
{
    if !shop.lock().await.cart.begin_edit(&id) {
        tracing::debug!(book_id = %id, "Edit ignored, item already pending");
        return EditOutcome::AlreadyPending;
    }

    let task_shop = Arc::clone(&shop);
    let task_id = id.clone();
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut guard = task_shop.lock().await;
        apply(&mut guard.cart, &task_id);
        guard.cart.finish_edit(&task_id);
    });

    match task.await {
        Ok(()) => EditOutcome::Applied,
        Err(e) => {
            tracing::error!(book_id = %id, error = %e, "Cart edit task aborted");
            shop.lock().await.cart.finish_edit(&id);
            EditOutcome::Failed
        }
    }
}
