//! Integration tests for the storefront client against a mock Admin API.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dropbridge_http::{HttpClientConfig, ResilientClient};
use dropbridge_storefront::{StorefrontClient, StorefrontError};

const TOKEN: &str = "shpat_test_token";

fn fast_http() -> ResilientClient {
    ResilientClient::new(&HttpClientConfig {
        pacing_delay_ms: 0,
        backoff_base_secs: 0,
        rate_limit_fallback_secs: 0,
        ..HttpClientConfig::default()
    })
    .unwrap()
}

fn client_for(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_base_url(fast_http(), &server.uri(), TOKEN)
}

fn product_page(ids: &[i64]) -> serde_json::Value {
    let products: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "variants": [{
                    "id": id * 10,
                    "sku": format!("SKU-{id}"),
                    "inventory_item_id": id * 100,
                    "inventory_quantity": 5,
                }],
            })
        })
        .collect();
    json!({ "products": products })
}

#[tokio::test]
async fn fetch_products_page_sends_access_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(header("X-Shopify-Access-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(&[1])))
        .expect(1)
        .mount(&server)
        .await;

    let (products, next) = client_for(&server)
        .fetch_products_page(250, None)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].variants[0].sku.as_deref(), Some("SKU-1"));
    assert!(next.is_none());
}

#[tokio::test]
async fn fetch_all_products_follows_link_header_cursors() {
    let server = MockServer::start().await;
    let next_url = format!("{}/products.json?limit=2&page_info=CURSOR2", server.uri());

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "2"))
        .and(query_param("page_info", "CURSOR2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(&[3])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_page(&[1, 2]))
                .insert_header("Link", format!(r#"<{next_url}>; rel="next""#).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).fetch_all_products(2).await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn fetch_all_products_stops_on_missing_link_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(&[7])))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).fetch_all_products(250).await.unwrap();
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn default_location_returns_first_location_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations.json"))
        .and(header("X-Shopify-Access-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [
                { "id": 42, "name": "Main warehouse" },
                { "id": 43, "name": "Pop-up" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server).default_location().await.unwrap();
    assert_eq!(location, 42);
}

#[tokio::test]
async fn default_location_fails_when_store_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locations": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).default_location().await.unwrap_err();
    assert!(matches!(err, StorefrontError::NoLocation));
}

#[tokio::test]
async fn set_inventory_level_posts_expected_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory_levels/set.json"))
        .and(header("X-Shopify-Access-Token", TOKEN))
        .and(body_json(json!({
            "location_id": 42,
            "inventory_item_id": 900,
            "available": 17,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "inventory_level": { "inventory_item_id": 900, "location_id": 42, "available": 17 },
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .set_inventory_level(900, 42, 17)
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_surfaces_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_products_page(250, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Http(dropbridge_http::HttpError::Status { status: 401, .. })
    ));
}

#[tokio::test]
async fn malformed_products_body_reports_deserialize_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_products_page(250, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Deserialize { .. }));
}
