//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for the shopper id that selects the in-memory shop.
    pub const SHOPPER_ID: &str = "shopper_id";
}
