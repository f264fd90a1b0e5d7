//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::filters;
use crate::middleware::CurrentShop;
use crate::routes::cart::{CartCountTemplate, CartPanelTemplate};

/// Page shell. The catalog container fetches its own content after load.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub badge: CartCountTemplate,
    pub panel: CartPanelTemplate,
}

/// Display home page.
#[instrument(skip_all)]
pub async fn home(CurrentShop(shop): CurrentShop) -> HomeTemplate {
    let guard = shop.lock().await;

    HomeTemplate {
        badge: CartCountTemplate {
            count: guard.cart.item_count(),
            oob: false,
        },
        panel: CartPanelTemplate::for_cart(&guard.cart),
    }
}
