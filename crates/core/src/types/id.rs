//! Book identifiers.
//!
//! Generated books carry no identity of their own, so the catalog fetcher
//! assigns one when a response is accepted. Ids are opaque strings; the only
//! guarantee is uniqueness within a session.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a book in the current catalog.
///
/// ```
/// use folio_core::BookId;
///
/// let id = BookId::generate(1_700_000_000_000, 3);
/// assert_eq!(id.as_str(), "book-1700000000000-3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Wrap an existing id string, e.g. one posted back from a form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id for the book at `index` of a catalog fetched at
    /// `timestamp_millis`.
    #[must_use]
    pub fn generate(timestamp_millis: i64, index: usize) -> Self {
        Self(format!("book-{timestamp_millis}-{index}"))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
