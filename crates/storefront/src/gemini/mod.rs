//! Google Gemini API client used to generate the book catalog.
//!
//! Only the non-streaming `generateContent` call is implemented. Requests
//! carry a JSON response schema so the model answers with structured data;
//! callers get the raw text of the first candidate and do their own
//! validation.

mod client;
mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::{ApiErrorResponse, GeminiError};
pub use types::{GenerateContentRequest, GenerateContentResponse, Schema, SchemaType};
