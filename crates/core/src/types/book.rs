//! Books and cart line items.

use serde::{Deserialize, Serialize};

use super::{BookId, Price};

/// A generated book in the catalog.
///
/// Books are immutable once the catalog fetcher has accepted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Price,
    pub cover_image_url: String,
}

/// A book in the cart together with how many copies were added.
///
/// The quantity is always at least one; the cart drops items instead of
/// storing a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub book: Book,
    pub quantity: u32,
}

impl CartItem {
    /// Start a line for `book` with a quantity of one.
    #[must_use]
    pub const fn new(book: Book) -> Self {
        Self { book, quantity: 1 }
    }

    /// The id of the book this line holds.
    #[must_use]
    pub const fn id(&self) -> &BookId {
        &self.book.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.book.price.times(self.quantity)
    }
}
