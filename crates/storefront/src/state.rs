//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::gemini::GeminiClient;
use crate::middleware::session::SESSION_EXPIRY;
use crate::services::shop::ShopStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog generation client and the in-memory shops.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    gemini: GeminiClient,
    shops: ShopStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let gemini = GeminiClient::new(&config.gemini);
        let shops = ShopStore::new(SESSION_EXPIRY);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                gemini,
                shops,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Gemini API client.
    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Get a reference to the per-session shops.
    #[must_use]
    pub fn shops(&self) -> &ShopStore {
        &self.inner.shops
    }
}
