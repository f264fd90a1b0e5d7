//! Catalog generation.
//!
//! One `generateContent` call asks for a fixed number of fictional books as a
//! JSON array. The answer is validated item by item and every accepted book gets
//! an id built from the fetch time and its position. Nothing is retried here;
//! the user decides whether to try again.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use folio_core::{Book, BookId, Price};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::gemini::types::{GenerateContentRequest, Schema, SchemaType};
use crate::gemini::{GeminiClient, GeminiError};

/// Number of books requested per fetch.
pub const BOOK_COUNT: usize = 12;

/// Message shown whenever a fetch fails, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books. Please try again later.";

const PROMPT: &str = "Generate a list of 12 creative, fictional books across different genres \
like sci-fi, fantasy, mystery, and romance. Provide a unique title, author, a compelling \
one-paragraph description, a realistic price, and a unique placeholder image URL for each book \
from picsum.photos using a seed based on the book title (e.g., /seed/a-tale-of-stars/400/600).";

/// Stamp of the most recent fetch, in unix millis.
static LAST_FETCH_STAMP: AtomicI64 = AtomicI64::new(0);

/// Errors from fetching or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The generation service could not be reached or refused the request.
    #[error("catalog request failed: {0}")]
    Gemini(#[from] GeminiError),

    /// The service answered, but not with a usable list of books.
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
}

/// One book as the model returns it, before an id is assigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedBook {
    title: String,
    author: String,
    description: String,
    price: f64,
    cover_image_url: String,
}

/// Build the `generateContent` request for a catalog.
#[must_use]
pub fn catalog_request() -> GenerateContentRequest {
    let book = Schema::object(vec![
        (
            "title",
            Schema::scalar(SchemaType::String, "The title of the book."),
        ),
        (
            "author",
            Schema::scalar(SchemaType::String, "The author of the book."),
        ),
        (
            "description",
            Schema::scalar(
                SchemaType::String,
                "A brief, compelling one-paragraph summary of the book.",
            ),
        ),
        (
            "price",
            Schema::scalar(
                SchemaType::Number,
                "The price of the book in USD, e.g., 19.99.",
            ),
        ),
        (
            "coverImageUrl",
            Schema::scalar(
                SchemaType::String,
                "A placeholder image URL from picsum.photos with a unique seed, e.g. https://picsum.photos/seed/booktitle/400/600",
            ),
        ),
    ]);

    GenerateContentRequest::from_prompt(PROMPT).with_json_schema(Schema::array(book))
}

/// Fetch a fresh catalog.
///
/// # Errors
///
/// Returns [`CatalogError::Gemini`] for transport and API failures and
/// [`CatalogError::InvalidResponse`] when the answer does not validate.
#[instrument(skip(client))]
pub async fn fetch_catalog(client: &GeminiClient) -> Result<Vec<Book>, CatalogError> {
    let text = client.generate_text(&catalog_request()).await?;
    let books = parse_catalog(&text, next_fetch_stamp(Utc::now().timestamp_millis()))?;

    if books.len() != BOOK_COUNT {
        tracing::warn!(
            expected = BOOK_COUNT,
            received = books.len(),
            "Catalog size differs from request"
        );
    }
    tracing::info!(count = books.len(), "Catalog fetched");
    Ok(books)
}

/// The fetch time in millis, bumped past the previous fetch when two land in
/// the same millisecond or the clock steps back. Ids built from it never
/// repeat within the process.
fn next_fetch_stamp(now_millis: i64) -> i64 {
    let previous = LAST_FETCH_STAMP
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now_millis.max(last.saturating_add(1)))
        })
        .unwrap_or_else(|last| last);
    now_millis.max(previous.saturating_add(1))
}

/// Validate generated JSON and assign ids.
///
/// `fetched_at_millis` seeds the ids, so two fetches made at different times
/// never share an id.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidResponse`] if the text is not JSON, the top
/// level is not an array, or any item is missing a field, has a field of the
/// wrong type, or has a negative price.
pub fn parse_catalog(text: &str, fetched_at_millis: i64) -> Result<Vec<Book>, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| CatalogError::InvalidResponse(format!("not JSON: {e}")))?;

    let serde_json::Value::Array(items) = value else {
        return Err(CatalogError::InvalidResponse(
            "API did not return an array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let generated: GeneratedBook = serde_json::from_value(item)
                .map_err(|e| CatalogError::InvalidResponse(format!("item {index}: {e}")))?;
            into_book(generated, BookId::generate(fetched_at_millis, index))
                .map_err(|reason| CatalogError::InvalidResponse(format!("item {index}: {reason}")))
        })
        .collect()
}

fn into_book(generated: GeneratedBook, id: BookId) -> Result<Book, String> {
    let price = Price::from_f64(generated.price).map_err(|e| e.to_string())?;

    let cover_image_url = if generated.cover_image_url.trim().is_empty() {
        cover_url_for(&generated.title)
    } else {
        generated.cover_image_url
    };

    Ok(Book {
        id,
        title: generated.title,
        author: generated.author,
        description: generated.description,
        price,
        cover_image_url,
    })
}

/// Deterministic placeholder cover for a title.
#[must_use]
pub fn cover_url_for(title: &str) -> String {
    format!("https://picsum.photos/seed/{}/400/600", slugify(title))
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "book".to_string()
    } else {
        slug
    }
}
