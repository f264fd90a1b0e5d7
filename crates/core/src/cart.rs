//! In-memory shopping cart.
//!
//! The cart is an ordered list of [`CartItem`]s keyed by book id. Items keep
//! the order in which they were first added, and there is never more than one
//! item per book.
//!
//! Besides the lines themselves the cart carries two bits of view state: whether
//! the cart panel is open, and which items have an edit in flight. Edits are
//! applied by the caller after a short delay; [`Cart::begin_edit`] marks the
//! item so its controls render disabled, and refuses a second edit on the same
//! item until [`Cart::finish_edit`] is called.

use std::collections::HashSet;

use crate::types::{Book, BookId, CartItem, Price};

/// Ordered collection of cart items plus panel state.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    pending: HashSet<BookId>,
    open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of `book`.
    ///
    /// Increments the quantity when the book is already in the cart, otherwise
    /// appends a new item with quantity one.
    pub fn add(&mut self, book: Book) {
        if let Some(item) = self.find_mut(&book.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::new(book));
        }
    }

    /// Remove the item for `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: &BookId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Set the quantity for `id`.
    ///
    /// A quantity of zero or less removes the item. Quantities above
    /// `u32::MAX` saturate. Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: &BookId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.find_mut(id) {
            item.quantity = quantity;
        }
    }

    /// Sum of price times quantity over all items.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the item for `id`.
    #[must_use]
    pub fn get(&self, id: &BookId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the cart panel is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open the panel if closed, close it if open. Returns the new state.
    pub const fn toggle_visibility(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Mark `id` as having an edit in flight.
    ///
    /// Returns `false` without changing anything if an edit for `id` is
    /// already pending.
    pub fn begin_edit(&mut self, id: &BookId) -> bool {
        self.pending.insert(id.clone())
    }

    /// Clear the pending mark for `id`.
    pub fn finish_edit(&mut self, id: &BookId) {
        self.pending.remove(id);
    }

    /// Whether `id` has an edit in flight.
    #[must_use]
    pub fn is_pending(&self, id: &BookId) -> bool {
        self.pending.contains(id)
    }

    fn find_mut(&mut self, id: &BookId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn book(id: &str, price: f64) -> Book {
        Book {
            id: BookId::new(id),
            title: format!("Title {id}"),
            author: "A. Writer".to_string(),
            description: "A story.".to_string(),
            price: Price::from_f64(price).unwrap(),
            cover_image_url: format!("https://picsum.photos/seed/{id}/400/600"),
        }
    }

    #[test]
    fn test_add_same_book_twice_merges() {
        let mut cart = Cart::new();
        cart.add(book("a", 10.0));
        cart.add(book("a", 10.0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(&BookId::new("a")).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(book("b", 1.0));
        cart.add(book("a", 1.0));
        cart.add(book("b", 1.0));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(book("a", 3.0));
        cart.add(book("a", 3.0));
        cart.add(book("b", 4.0));

        cart.set_quantity(&BookId::new("a"), 0);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().id().as_str(), "b");
        assert_eq!(cart.items().first().unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(book("a", 3.0));
        cart.set_quantity(&BookId::new("a"), -7);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_exact() {
        let mut cart = Cart::new();
        cart.add(book("a", 3.0));
        cart.add(book("b", 4.0));

        cart.set_quantity(&BookId::new("a"), 5);

        assert_eq!(cart.get(&BookId::new("a")).unwrap().quantity, 5);
        assert_eq!(cart.get(&BookId::new("b")).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add(book("a", 1.0));
        cart.set_quantity(&BookId::new("a"), i64::MAX);
        assert_eq!(cart.get(&BookId::new("a")).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(book("a", 1.0));
        cart.set_quantity(&BookId::new("zzz"), 3);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(book("a", 1.0));
        cart.remove(&BookId::new("missing"));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::new();
        cart.add(book("a", 19.99));
        cart.add(book("a", 19.99));
        cart.add(book("b", 5.01));

        assert_eq!(cart.subtotal().to_string(), "$45.99");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_is_empty_tracks_items() {
        let mut cart = Cart::new();
        assert!(cart.is_empty());
        cart.add(book("a", 1.0));
        assert!(!cart.is_empty());
        cart.remove(&BookId::new("a"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_toggle_visibility() {
        let mut cart = Cart::new();
        assert!(!cart.is_open());
        assert!(cart.toggle_visibility());
        assert!(!cart.toggle_visibility());
    }

    #[test]
    fn test_begin_edit_refuses_reentry() {
        let mut cart = Cart::new();
        let id = BookId::new("a");

        assert!(cart.begin_edit(&id));
        assert!(cart.is_pending(&id));
        assert!(!cart.begin_edit(&id));

        cart.finish_edit(&id);
        assert!(!cart.is_pending(&id));
        assert!(cart.begin_edit(&id));
    }

    #[test]
    fn test_pending_is_per_item() {
        let mut cart = Cart::new();
        assert!(cart.begin_edit(&BookId::new("a")));
        assert!(cart.begin_edit(&BookId::new("b")));
        cart.finish_edit(&BookId::new("a"));
        assert!(cart.is_pending(&BookId::new("b")));
    }
}
