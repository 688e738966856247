//! Integration tests for the cart reconciler against a mock backend.

use std::sync::Arc;

use boutique_storefront::cart::{CartOutcome, Confirmation, IgnoredReason, ItemState};
use boutique_storefront::{
    ApiBaseUrl, BearerToken, MemoryTokenStore, SessionContext, Storefront, StorefrontConfig,
    StorefrontError,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "customer-jwt";

/// Creates a signed-in storefront pointed at the mock server.
fn storefront(server: &MockServer) -> Storefront {
    let config = StorefrontConfig::builder()
        .base_url(ApiBaseUrl::new(format!("{}/api", server.uri())).unwrap())
        .build();
    let store = MemoryTokenStore::with_token(BearerToken::new(TOKEN));
    Storefront::new(&config, SessionContext::new(Arc::new(store)))
}

fn item(id: u64, quantity: u32, stock: u32) -> Value {
    json!({
        "id": id,
        "product": {
            "id": id * 100,
            "name": format!("Item {id}"),
            "price": 1000,
            "discountPercent": 10,
            "stockQuantity": stock
        },
        "quantity": quantity,
        "dateAdded": 1_714_000_000_000_i64
    })
}

fn cart(items: &[Value], total: f64) -> Value {
    json!({ "items": items, "total": total, "itemCount": items.len() })
}

/// Serves `first` for the first cart read and `then` afterwards.
async fn mount_cart_sequence(server: &MockServer, first: Value, then: Value) {
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(then))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_sends_bearer_token_and_loads_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("Authorization", "Bearer customer-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart(&[item(42, 2, 5)], 1800.0)))
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    let snapshot = store.cart().snapshot();
    assert_eq!(snapshot.item_count, 1);
    assert_eq!(snapshot.total, Decimal::new(1800, 0));
    assert_eq!(snapshot.item(42).unwrap().line_total(), Decimal::new(1800, 0));
}

#[tokio::test]
async fn test_change_quantity_to_zero_sends_nothing() {
    let server = MockServer::start().await;
    mount_cart_sequence(&server, cart(&[item(42, 2, 5)], 1800.0), cart(&[item(42, 2, 5)], 1800.0)).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    let outcome = store.cart().change_quantity(42, 0).await.unwrap();
    assert_eq!(outcome, CartOutcome::Ignored(IgnoredReason::BelowMinimum));
    assert_eq!(store.cart().snapshot().item(42).unwrap().quantity, 2);
}

#[tokio::test]
async fn test_change_quantity_reloads_server_copy() {
    let server = MockServer::start().await;
    mount_cart_sequence(&server, cart(&[item(42, 1, 5)], 900.0), cart(&[item(42, 3, 5)], 2700.0)).await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/42"))
        .and(query_param("quantity", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    let outcome = store.cart().change_quantity(42, 3).await.unwrap();
    assert_eq!(outcome, CartOutcome::Applied);

    let snapshot = store.cart().snapshot();
    assert_eq!(snapshot.item(42).unwrap().quantity, 3);
    assert_eq!(snapshot.total, Decimal::new(2700, 0));
    assert_eq!(store.cart().item_state(42), ItemState::Idle);
}

#[tokio::test]
async fn test_quantity_never_leaves_one_to_stock() {
    let server = MockServer::start().await;
    mount_cart_sequence(&server, cart(&[item(42, 1, 1)], 900.0), cart(&[item(42, 1, 1)], 900.0)).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    for _ in 0..3 {
        store.cart().increment(42).await.unwrap();
        store.cart().decrement(42).await.unwrap();
    }
    let controls = store.cart().controls(42).unwrap();
    assert!(!controls.can_increment);
    assert!(!controls.can_decrement);
    assert!(controls.can_remove);
    assert_eq!(store.cart().snapshot().item(42).unwrap().quantity, 1);
}

#[tokio::test]
async fn test_decrement_lowers_line_left_above_stock() {
    let server = MockServer::start().await;
    mount_cart_sequence(&server, cart(&[item(42, 5, 2)], 4500.0), cart(&[item(42, 4, 2)], 3600.0)).await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/42"))
        .and(query_param("quantity", "4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();
    assert!(store.cart().controls(42).unwrap().can_decrement);

    let outcome = store.cart().decrement(42).await.unwrap();
    assert_eq!(outcome, CartOutcome::Applied);
    assert_eq!(store.cart().snapshot().item(42).unwrap().quantity, 4);
}

#[tokio::test]
async fn test_failed_update_marks_item_and_keeps_quantity() {
    let server = MockServer::start().await;
    mount_cart_sequence(&server, cart(&[item(42, 2, 5)], 1800.0), cart(&[item(42, 2, 5)], 1800.0)).await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/42"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Only 4 left in stock"})))
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    let error = store.cart().change_quantity(42, 5).await.unwrap_err();
    assert_eq!(error.notice(), "Only 4 left in stock");
    assert_eq!(
        store.cart().item_state(42),
        ItemState::Failed("Only 4 left in stock".to_string())
    );
    assert_eq!(store.cart().snapshot().item(42).unwrap().quantity, 2);
}

#[tokio::test]
async fn test_remove_requires_confirmation() {
    let server = MockServer::start().await;
    mount_cart_sequence(
        &server,
        cart(&[item(42, 1, 5), item(43, 2, 5)], 2700.0),
        cart(&[item(43, 2, 5)], 1800.0),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/remove/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    store.cart().refresh().await.unwrap();

    let declined = store.cart().remove_item(42, Confirmation::Declined).await.unwrap();
    assert_eq!(declined, CartOutcome::Declined);
    assert!(store.cart().snapshot().item(42).is_some());

    let confirmed = store.cart().remove_item(42, Confirmation::Confirmed).await.unwrap();
    assert_eq!(confirmed, CartOutcome::Applied);
    let snapshot = store.cart().snapshot();
    assert!(snapshot.item(42).is_none());
    assert_eq!(snapshot.item_count, 1);
}

#[tokio::test]
async fn test_add_to_cart_and_clear() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add/700"))
        .and(query_param("quantity", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/clear"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_cart_sequence(&server, cart(&[item(7, 2, 5)], 1800.0), cart(&[], 0.0)).await;

    let store = storefront(&server);
    assert_eq!(store.cart().add_to_cart(700, 2).await.unwrap(), CartOutcome::Applied);
    assert_eq!(store.cart().snapshot().total_units(), 2);

    assert_eq!(
        store.cart().clear(Confirmation::Declined).await.unwrap(),
        CartOutcome::Declined
    );
    assert_eq!(
        store.cart().clear(Confirmation::Confirmed).await.unwrap(),
        CartOutcome::Applied
    );
    assert!(store.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_expired_session_surfaces_auth_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = storefront(&server);
    let error = store.cart().refresh().await.unwrap_err();

    assert!(matches!(error, StorefrontError::AuthRequired));
    assert!(error.requires_login());
    assert!(!store.session().is_authenticated());
    assert!(store.cart().notice().is_some());
}
