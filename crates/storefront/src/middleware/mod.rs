//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with a bounded in-memory store)
//! 5. Security headers (CSP, frame and isolation policies)
//!
//! [`CurrentShop`] is an extractor rather than a layer: handlers that touch
//! the cart or catalog ask for it.

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shopper;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionCache, create_session_layer};
pub use shopper::CurrentShop;
