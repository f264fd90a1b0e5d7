//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Generate, validate and identify the book catalog
//! - `shop` - Per-session catalog and cart state, including the loading gate
//!   and the delayed cart edits

pub mod catalog;
pub mod shop;
