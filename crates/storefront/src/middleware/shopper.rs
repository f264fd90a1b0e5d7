//! Shopper extractor.
//!
//! Resolves the shop belonging to the current browser session. A session
//! without a shopper id gets a fresh one on first use.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::session_keys;
use crate::services::shop::SharedShop;
use crate::state::AppState;

/// Extractor yielding the shop of the current session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentShop(shop): CurrentShop) -> impl IntoResponse {
///     shop.lock().await.cart.item_count().to_string()
/// }
/// ```
pub struct CurrentShop(pub SharedShop);

impl FromRequestParts<AppState> for CurrentShop {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let shopper = shopper_id(&session).await?;
        Ok(Self(state.shops().get(shopper).await))
    }
}

/// Read the shopper id from the session, assigning one if absent.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn shopper_id(session: &Session) -> Result<Uuid, AppError> {
    if let Some(id) = session.get::<Uuid>(session_keys::SHOPPER_ID).await? {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session.insert(session_keys::SHOPPER_ID, id).await?;
    tracing::debug!(shopper_id = %id, "New shopper");
    Ok(id)
}
