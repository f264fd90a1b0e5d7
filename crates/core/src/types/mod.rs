//! Core types for Folio.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod book;
pub mod id;
pub mod price;

pub use book::{Book, CartItem};
pub use id::BookId;
pub use price::{Price, PriceError};
