//! Integration tests for the HTTP fetcher.
//!
//! A local axum server stands in for the upstream rate APIs so status,
//! body and timeout handling are exercised over a real socket.

use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};

use conversor_client::{HttpFetcher, SystemClock};
use conversor_hex::{PairQuoteProvider, RateProvider, RateService, UsdTableProvider};
use conversor_types::{AcquireError, CurrencyCode, FetchError, JsonFetcher, SnapshotSource};

/// Helper to serve the stub provider routes on an ephemeral port.
async fn spawn_stub_server() -> String {
    let app = Router::new()
        .route(
            "/usd-table",
            get(|| async { Json(json!({ "rates": { "BRL": 5.42, "EUR": 0.92 } })) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/garbage", get(|| async { "<html>not json</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        )
        .route(
            "/accept",
            get(|headers: HeaderMap| async move {
                let accept = headers
                    .get(header::ACCEPT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "accept": accept }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_millis(500)).unwrap()
}

#[tokio::test]
async fn test_fetches_json_body() {
    let base = spawn_stub_server().await;
    let body = fetcher().fetch_json(&format!("{base}/usd-table")).await.unwrap();
    assert_eq!(body["rates"]["BRL"], json!(5.42));
}

#[tokio::test]
async fn test_requests_json() {
    let base = spawn_stub_server().await;
    let body: Value = fetcher().fetch_json(&format!("{base}/accept")).await.unwrap();
    assert_eq!(body["accept"], "application/json");
}

#[tokio::test]
async fn test_non_success_status() {
    let base = spawn_stub_server().await;
    let err = fetcher().fetch_json(&format!("{base}/broken")).await.unwrap_err();
    assert_eq!(err, FetchError::Status(500));
}

#[tokio::test]
async fn test_invalid_json() {
    let base = spawn_stub_server().await;
    let err = fetcher().fetch_json(&format!("{base}/garbage")).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidJson(_)));
}

#[tokio::test]
async fn test_timeout() {
    let base = spawn_stub_server().await;
    let err = fetcher().fetch_json(&format!("{base}/slow")).await.unwrap_err();
    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn test_unreachable_host() {
    // Nothing listens on the discard port locally.
    let err = fetcher()
        .fetch_json("http://127.0.0.1:9/rates")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_) | FetchError::Timeout));
}

#[tokio::test]
async fn test_chain_falls_through_over_http() {
    let base = spawn_stub_server().await;
    let providers: Vec<Box<dyn RateProvider>> = vec![
        Box::new(PairQuoteProvider::new("broken", format!("{base}/broken"))),
        Box::new(UsdTableProvider::new("garbage", format!("{base}/garbage"))),
        Box::new(UsdTableProvider::new("stub", format!("{base}/usd-table"))),
    ];
    let service = RateService::with_providers(fetcher(), SystemClock, providers);

    let snapshot = service.acquire_rates().await.unwrap();

    assert_eq!(
        snapshot.source(),
        &SnapshotSource::Provider {
            name: "stub".into()
        }
    );
    assert_eq!(snapshot.rate(CurrencyCode::USD), Some(5.42));
}

#[tokio::test]
async fn test_chain_exhausted_over_http() {
    let base = spawn_stub_server().await;
    let providers: Vec<Box<dyn RateProvider>> = vec![
        Box::new(PairQuoteProvider::new("broken", format!("{base}/broken"))),
        Box::new(UsdTableProvider::new("slow", format!("{base}/slow"))),
    ];
    let service = RateService::with_providers(fetcher(), SystemClock, providers);

    let AcquireError::AllProvidersFailed { failures } = service.acquire_rates().await.unwrap_err();
    assert_eq!(failures.len(), 2);
}
