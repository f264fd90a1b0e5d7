//! End-to-end tests for the storefront routes.
//!
//! Each test runs the full router in process. Catalog fetches go either to a
//! local stand-in for the Gemini API or to an address nothing listens on.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use axum::http::StatusCode;
use folio_integration_tests::{
    TestApp, UNREACHABLE_GEMINI, book_ids, catalog_json, spawn_fake_gemini,
};
use folio_storefront::services::catalog::FETCH_FAILED_MESSAGE;

const NO_DELAY: Duration = Duration::ZERO;

/// A storefront whose catalog holds the two given books, already fetched.
async fn stocked_app(delay: Duration) -> (TestApp, Vec<String>) {
    let gemini = spawn_fake_gemini(&catalog_json(&[
        ("A Tale of Stars", 18.5),
        ("The Locked Orchard", 12.0),
    ]))
    .await;
    let mut app = TestApp::new(&gemini, delay);

    let catalog = app.post_form("/catalog/refresh", "").await;
    assert_eq!(catalog.status, StatusCode::OK);
    let ids = book_ids(&catalog.body);
    assert_eq!(ids.len(), 2);

    (app, ids)
}

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new(UNREACHABLE_GEMINI, NO_DELAY);
    let resp = app.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_page_shell() {
    let mut app = TestApp::new(UNREACHABLE_GEMINI, NO_DELAY);
    let resp = app.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Featured Books"));
    assert!(resp.body.contains("hx-post=\"/catalog/refresh\""));
    assert!(resp.body.contains("id=\"cart-count\""));
    assert!(!resp.body.contains("Your Cart"));
    assert!(resp.headers.contains_key("content-security-policy"));
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_new_session_has_empty_cart() {
    let mut app = TestApp::new(UNREACHABLE_GEMINI, NO_DELAY);
    let resp = app.get("/cart/count").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(">0<"));
}

#[tokio::test]
async fn test_add_unknown_book_is_not_found() {
    let mut app = TestApp::new(UNREACHABLE_GEMINI, NO_DELAY);
    let resp = app.post_form("/cart/add", "book_id=book-1-0").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(app.get("/cart/count").await.body.contains(">0<"));
}

#[tokio::test]
async fn test_failed_fetch_shows_generic_message() {
    let mut app = TestApp::new(UNREACHABLE_GEMINI, NO_DELAY);

    let resp = app.post_form("/catalog/refresh", "").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(FETCH_FAILED_MESSAGE));
    assert!(!resp.body.contains("book-card"));

    let again = app.get("/catalog").await;
    assert!(again.body.contains(FETCH_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_non_array_response_fails_catalog() {
    let gemini = spawn_fake_gemini(r#"{"books": []}"#).await;
    let mut app = TestApp::new(&gemini, NO_DELAY);

    let resp = app.post_form("/catalog/refresh", "").await;
    assert!(resp.body.contains(FETCH_FAILED_MESSAGE));
    assert!(book_ids(&resp.body).is_empty());
}

#[tokio::test]
async fn test_catalog_renders_cards() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    let resp = app.get("/catalog").await;

    assert_eq!(book_ids(&resp.body), ids);
    assert!(resp.body.contains("A Tale of Stars"));
    assert!(resp.body.contains("$18.50"));
    assert!(resp.body.contains("the-locked-orchard"));
    assert!(ids.iter().all(|id| id.starts_with("book-")));
}

#[tokio::test]
async fn test_add_updates_badge_and_fires_event() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    let first = format!("book_id={}", ids[0]);

    app.post_form("/cart/add", &first).await;
    let resp = app.post_form("/cart/add", &first).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers["hx-trigger"], "cart-updated");
    assert!(resp.body.contains(">2<"));
}

#[tokio::test]
async fn test_panel_is_empty_until_toggled() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;

    assert!(app.get("/cart").await.body.trim().is_empty());

    let open = app.post_form("/cart/toggle", "").await;
    assert!(open.body.contains("Your Cart"));
    assert!(open.body.contains("$18.50"));
    assert!(open.body.contains("Proceed to Checkout"));

    let closed = app.post_form("/cart/toggle", "").await;
    assert!(closed.body.trim().is_empty());
}

#[tokio::test]
async fn test_update_and_remove_flow() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[1])).await;
    app.post_form("/cart/toggle", "").await;

    let resp = app
        .post_form("/cart/update", &format!("book_id={}&quantity=3", ids[0]))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    // 3 x 18.50 + 12.00
    assert!(resp.body.contains("$67.50"));
    assert!(resp.body.contains("hx-swap-oob=\"true\">4<"));

    let resp = app
        .post_form("/cart/update", &format!("book_id={}&quantity=0", ids[0]))
        .await;
    assert!(!resp.body.contains("A Tale of Stars"));
    assert!(resp.body.contains("$12.00"));

    let resp = app
        .post_form("/cart/remove", &format!("book_id={}", ids[1]))
        .await;
    assert!(resp.body.contains("Your cart is empty."));
    assert!(app.get("/cart/count").await.body.contains(">0<"));
}

#[tokio::test]
async fn test_unparsable_quantity_is_rejected() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;

    let resp = app
        .post_form("/cart/update", &format!("book_id={}&quantity=lots", ids[0]))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(app.get("/cart/count").await.body.contains(">1<"));
}

#[tokio::test]
async fn test_item_is_pending_while_edit_waits() {
    let (mut app, ids) = stocked_app(Duration::from_millis(300)).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;
    app.post_form("/cart/toggle", "").await;

    let mut editor = app.clone();
    let form = format!("book_id={}", ids[0]);
    let edit = tokio::spawn(async move { editor.post_form("/cart/remove", &form).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let during = app.get("/cart").await;
    assert!(during.body.contains("is-pending"));
    assert!(during.body.contains("<fieldset disabled"));

    let done = edit.await.unwrap();
    assert!(done.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_sessions_have_separate_carts() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;

    let mut other = app.new_session();
    assert!(other.get("/cart/count").await.body.contains(">0<"));

    // The other session has no catalog yet, so the book is unknown there
    let resp = other
        .post_form("/cart/add", &format!("book_id={}", ids[0]))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_survives_catalog_refresh() {
    let (mut app, ids) = stocked_app(NO_DELAY).await;
    app.post_form("/cart/add", &format!("book_id={}", ids[0])).await;

    let refreshed = app.post_form("/catalog/refresh", "").await;
    assert_eq!(book_ids(&refreshed.body).len(), 2);
    assert!(app.get("/cart/count").await.body.contains(">1<"));
}
