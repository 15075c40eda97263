//! Integration tests for `ResilientClient::execute`.
//!
//! Each test stands up a local `wiremock` server; no real network traffic.
//! Covers the happy path, immediate surfacing of HTTP error statuses,
//! rate-limit waits that bypass the retry budget, and the bounded back-off
//! behaviour on network-level failures.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dropbridge_http::{HttpClientConfig, HttpError, ResilientClient};

/// A client with no pacing and no back-off sleep, for fast tests.
fn fast_client(max_attempts: u32) -> ResilientClient {
    ResilientClient::new(&HttpClientConfig {
        timeout_secs: 5,
        user_agent: "dropbridge-test/0.1".to_owned(),
        pacing_delay_ms: 0,
        max_attempts,
        backoff_base_secs: 0,
        rate_limit_fallback_secs: 0,
    })
    .expect("failed to build test client")
}

#[tokio::test]
async fn returns_status_and_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let client = fast_client(3);
    let response = client
        .execute(Method::GET, &format!("{}/ping", server.uri()), None, &[])
        .await
        .expect("expected success");

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, "pong");
}

#[tokio::test]
async fn sends_json_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("X-Test-Token", "secret"))
        .and(body_json(json!({"user": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(3);
    let body = json!({"user": "u", "password": "p"});
    let result = client
        .execute(
            Method::POST,
            &format!("{}/submit", server.uri()),
            Some(&body),
            &[("X-Test-Token", "secret")],
        )
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn surfaces_http_error_status_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .expect(1) // a request defect must not be retried
        .mount(&server)
        .await;

    let client = fast_client(5);
    let err = client
        .execute(Method::GET, &format!("{}/forbidden", server.uri()), None, &[])
        .await
        .expect_err("expected status error");

    match err {
        HttpError::Status { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, "denied");
        }
        other => panic!("expected HttpError::Status, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_wait_does_not_consume_retry_budget() {
    let server = MockServer::start().await;

    // Two 429s, then success. With max_attempts = 1 the call would fail if a
    // 429 re-issue counted as a retry.
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = fast_client(1);
    let response = client
        .execute(Method::GET, &format!("{}/limited", server.uri()), None, &[])
        .await
        .expect("expected success after rate-limit waits");

    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn rate_limit_honours_retry_after_hint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = fast_client(1);
    let started = Instant::now();
    let result = client
        .execute(Method::GET, &format!("{}/limited", server.uri()), None, &[])
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(
        started.elapsed() >= Duration::from_secs(1),
        "client must wait out the Retry-After hint before re-issuing"
    );
}

#[tokio::test]
async fn rate_limit_falls_back_when_hint_unparsable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "soonish"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // Fallback wait is 0 in the test config, so this completes immediately.
    let client = fast_client(1);
    let result = client
        .execute(Method::GET, &format!("{}/limited", server.uri()), None, &[])
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn network_failure_exhausts_exact_attempt_budget() {
    // Nothing listens on this port; every attempt fails at connect.
    let client = fast_client(4);
    let err = client
        .execute(Method::GET, "http://127.0.0.1:1/unreachable", None, &[])
        .await
        .expect_err("expected network failure");

    match err {
        HttpError::Network { attempts, .. } => {
            assert_eq!(attempts, 4, "must make exactly max_attempts attempts");
        }
        other => panic!("expected HttpError::Network, got: {other:?}"),
    }
}

#[tokio::test]
async fn applies_pacing_delay_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ResilientClient::new(&HttpClientConfig {
        timeout_secs: 5,
        user_agent: "dropbridge-test/0.1".to_owned(),
        pacing_delay_ms: 200,
        max_attempts: 1,
        backoff_base_secs: 0,
        rate_limit_fallback_secs: 0,
    })
    .unwrap();

    let started = Instant::now();
    client
        .execute(Method::GET, &server.uri(), None, &[])
        .await
        .unwrap();
    assert!(
        started.elapsed() >= Duration::from_millis(200),
        "pacing delay must precede the request"
    );
}
