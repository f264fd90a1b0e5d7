//! Folio Core - Domain types for the Folio book storefront.
//!
//! This crate provides the types shared by the storefront binary and its tests:
//! - [`types`] - `BookId`, `Price`, `Book` and `CartItem`
//! - [`cart`] - the in-memory cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients, no timers. The storefront crate owns fetching, delays and
//! rendering.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::Cart;
pub use types::*;
