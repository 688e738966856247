//! Integration tests for catalog filtering and latest-wins fetching.
//!
//! These tests drive the product endpoints through a mock backend and check
//! which product list ends up displayed.

use std::time::Duration;

use boutique_storefront::catalog::{FetchOutcome, FilterField, FilterState, StarRating, UrlSync};
use boutique_storefront::{ApiBaseUrl, SessionContext, Storefront, StorefrontConfig};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a storefront pointed at the mock server.
fn storefront(server: &MockServer) -> Storefront {
    let config = StorefrontConfig::builder()
        .base_url(ApiBaseUrl::new(format!("{}/api", server.uri())).unwrap())
        .build();
    Storefront::new(&config, SessionContext::in_memory())
}

fn product_json(id: u64, name: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Handwoven",
        "price": 2499.0,
        "discountPercent": 0,
        "category": category,
        "stockQuantity": 12,
        "sizeOptions": "Free Size",
        "isAvailable": true
    })
}

fn category(name: &str) -> FilterState {
    FilterState::default()
        .set_filter(FilterField::Category, name)
        .unwrap()
}

// ============================================================================
// Filter state and query string
// ============================================================================

#[test]
fn test_query_string_round_trips_through_url_sync() {
    let sync = UrlSync::new();
    sync.set_filter(FilterField::Category, "Sarees").unwrap();
    sync.set_filter(FilterField::SortBy, "priceAsc").unwrap();
    sync.set_filter(FilterField::Color, "Maroon").unwrap();
    sync.set_filter(FilterField::Keyword, "kanjeevaram silk").unwrap();
    sync.set_price_range(Some(Decimal::new(1000, 0)), Some(Decimal::new(499_950, 2)))
        .unwrap();

    let restored = UrlSync::from_query(&format!("?{}", sync.query_string()));
    assert_eq!(restored.state(), sync.state());
}

#[test]
fn test_separate_price_bounds_match_combined_update() {
    let stepwise = UrlSync::from_query("category=Lehengas");
    stepwise.set_filter(FilterField::MinPrice, "1500").unwrap();
    stepwise.set_filter(FilterField::MaxPrice, "8000").unwrap();

    let combined = UrlSync::from_query("category=Lehengas");
    combined
        .set_price_range(Some(Decimal::new(1500, 0)), Some(Decimal::new(8000, 0)))
        .unwrap();

    assert_eq!(stepwise.state(), combined.state());
    assert_eq!(stepwise.query_string(), combined.query_string());
}

#[test]
fn test_clear_all_removes_every_query_parameter() {
    let sync = UrlSync::from_query(
        "category=Kurtis&sortBy=oldest&minPrice=500&maxPrice=900&status=inStock&color=Blue&keyword=cotton",
    );
    assert!(sync.state().has_active_filters());

    sync.clear_all();
    assert_eq!(sync.query_string(), "");
    assert_eq!(sync.state(), FilterState::default());
}

#[test]
fn test_star_rating_partition() {
    let stars = StarRating::from_rating(3.5);
    assert_eq!((stars.full, stars.half, stars.empty), (3, true, 1));
}

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_request_carries_one_parameter_per_non_empty_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "Sarees"))
        .and(query_param("sortBy", "priceDesc"))
        .and(query_param("status", "onSale"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(1, "Paithani", "Sarees")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    let filter = category("Sarees")
        .set_filter(FilterField::SortBy, "priceDesc")
        .unwrap()
        .set_filter(FilterField::Status, "onSale")
        .unwrap();

    let outcome = store.catalog().fetch(filter).await;
    assert!(matches!(outcome, FetchOutcome::Applied { count: 1 }));
    assert_eq!(store.catalog().products()[0].name, "Paithani");
}

#[tokio::test]
async fn test_slow_response_for_older_filter_never_overwrites_newer_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "Sarees"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    product_json(1, "Banarasi", "Sarees"),
                    product_json(2, "Chiffon", "Sarees")
                ]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "Lehengas"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(3, "Bridal Lehenga", "Lehengas")])),
        )
        .mount(&server)
        .await;

    let store = storefront(&server);
    let fetcher = store.catalog().clone();

    let sarees = tokio::spawn(fetcher.fetch(category("Sarees")));
    let lehengas = tokio::spawn(fetcher.fetch(category("Lehengas")));

    assert!(lehengas.await.unwrap().is_applied());
    assert!(matches!(sarees.await.unwrap(), FetchOutcome::Superseded));

    let shown = fetcher.products();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].category, "Lehengas");
    assert!(!fetcher.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list_and_reports_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "Kurtis"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(5, "Anarkali", "Kurtis")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "Dupattas"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Catalog temporarily unavailable"})),
        )
        .mount(&server)
        .await;

    let store = storefront(&server);
    assert!(store.catalog().fetch(category("Kurtis")).await.is_applied());

    let outcome = store.catalog().fetch(category("Dupattas")).await;
    assert!(matches!(outcome, FetchOutcome::Failed(_)));
    assert_eq!(store.catalog().products()[0].name, "Anarkali");
    assert_eq!(
        store.catalog().notice().as_deref(),
        Some("Catalog temporarily unavailable")
    );
}

#[tokio::test]
async fn test_watch_refetches_when_filter_changes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("color", "Green"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(9, "Mint Kurti", "Kurtis")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = storefront(&server);
    let sync = UrlSync::new();
    let task = store.catalog().spawn_watch(sync.subscribe());

    sync.set_filter(FilterField::Color, "Green").unwrap();

    let mut displayed = Vec::new();
    for _ in 0..100 {
        displayed = store.catalog().products();
        if !displayed.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].name, "Mint Kurti");

    drop(sync);
    task.await.unwrap();
}

// ============================================================================
// Product endpoints
// ============================================================================

#[tokio::test]
async fn test_product_detail_categories_and_featured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/featured"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(1, "Featured Saree", "Sarees")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Sarees", "Lehengas", "Kurtis"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": product_json(1, "Featured Saree", "Sarees"),
            "reviews": [
                { "id": 1, "rating": 4, "comment": "Beautiful drape", "datePosted": "2024-02-11T09:15:00.000+00:00", "isApproved": true }
            ],
            "averageRating": 4.0,
            "reviewCount": 1,
            "relatedProducts": [product_json(2, "Organza Saree", "Sarees")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = storefront(&server);

    let featured = store.products().featured().await.unwrap();
    assert_eq!(featured[0].name, "Featured Saree");

    let categories = store.products().categories().await.unwrap();
    assert_eq!(categories, vec!["Sarees", "Lehengas", "Kurtis"]);

    let detail = store.products().product_detail(1).await.unwrap();
    assert_eq!(detail.review_count, 1);
    assert_eq!(detail.related_products[0].name, "Organza Saree");
    assert_eq!(StarRating::from_rating(detail.average_rating).full, 4);

    let missing = store.products().product_detail(404).await.unwrap_err();
    assert_eq!(missing.notice(), "Request failed with status 404");
}
