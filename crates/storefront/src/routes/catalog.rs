//! Catalog route handlers.
//!
//! The page shell asks for a refresh as soon as it loads. A refresh that finds
//! a fetch already running answers with the spinner, which polls `GET /catalog`
//! until the state settles.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use folio_core::Book;
use tracing::instrument;

use crate::middleware::CurrentShop;
use crate::services::catalog::{FETCH_FAILED_MESSAGE, fetch_catalog};
use crate::services::shop::{CatalogState, refresh_catalog};
use crate::state::AppState;

/// Book card display data for templates.
#[derive(Clone)]
pub struct BookView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: String,
    pub cover_image_url: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price.to_string(),
            cover_image_url: book.cover_image_url.clone(),
        }
    }
}

/// What the catalog container shows.
#[derive(Clone)]
pub enum CatalogView {
    /// Nothing fetched yet; the fragment starts a fetch when it loads.
    Idle,
    /// A fetch is running; the fragment polls for the outcome.
    Loading,
    /// Cards for every book.
    Ready(Vec<BookView>),
    /// The fetch failed; only the message and a retry button.
    Failed(&'static str),
}

impl From<&CatalogState> for CatalogView {
    fn from(state: &CatalogState) -> Self {
        match state {
            CatalogState::Idle => Self::Idle,
            CatalogState::Loading => Self::Loading,
            CatalogState::Ready(books) => Self::Ready(books.iter().map(BookView::from).collect()),
            CatalogState::Failed => Self::Failed(FETCH_FAILED_MESSAGE),
        }
    }
}

/// Catalog fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog.html")]
pub struct CatalogTemplate {
    pub view: CatalogView,
}

impl From<&CatalogState> for CatalogTemplate {
    fn from(state: &CatalogState) -> Self {
        Self {
            view: CatalogView::from(state),
        }
    }
}

/// Current catalog fragment. Never starts a fetch by itself.
#[instrument(skip_all)]
pub async fn show(CurrentShop(shop): CurrentShop) -> CatalogTemplate {
    let guard = shop.lock().await;
    CatalogTemplate::from(&guard.catalog)
}

/// Fetch a fresh catalog and return its fragment.
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    CurrentShop(shop): CurrentShop,
) -> CatalogTemplate {
    let client = state.gemini().clone();
    let next = refresh_catalog(shop, async move { fetch_catalog(&client).await }).await;
    CatalogTemplate::from(&next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use folio_core::{BookId, Price};

    use super::*;

    fn book() -> Book {
        Book {
            id: BookId::new("book-1-0"),
            title: "The <Locked> Orchard".to_string(),
            author: "Ben Hale".to_string(),
            description: "A village mystery.".to_string(),
            price: Price::from_f64(12.5).unwrap(),
            cover_image_url: "https://picsum.photos/seed/the-locked-orchard/400/600".to_string(),
        }
    }

    #[test]
    fn test_failed_fragment_shows_message_and_no_cards() {
        let html = CatalogTemplate::from(&CatalogState::Failed).render().unwrap();

        assert!(html.contains(FETCH_FAILED_MESSAGE));
        assert!(html.contains("hx-post=\"/catalog/refresh\""));
        assert!(!html.contains("book-card"));
    }

    #[test]
    fn test_ready_fragment_renders_escaped_cards() {
        let html = CatalogTemplate::from(&CatalogState::Ready(vec![book()]))
            .render()
            .unwrap();

        assert!(html.contains("book-card"));
        assert!(html.contains("$12.50"));
        assert!(html.contains("Orchard"));
        assert!(!html.contains("<Locked>"));
        assert!(html.contains("value=\"book-1-0\""));
    }

    #[test]
    fn test_loading_fragment_polls() {
        let html = CatalogTemplate::from(&CatalogState::Loading).render().unwrap();

        assert!(html.contains("hx-get=\"/catalog\""));
        assert!(!html.contains("book-card"));
    }

    #[test]
    fn test_idle_fragment_starts_fetch() {
        let html = CatalogTemplate::from(&CatalogState::Idle).render().unwrap();
        assert!(html.contains("hx-trigger=\"load\""));
    }
}
