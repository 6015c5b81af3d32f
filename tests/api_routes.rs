use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use xact_matcher::api::{router, AppState, MatchResponse};
use xact_matcher::service::SequentialExecutor;
use xact_matcher::{BatchScheduler, OrderMatcher};

fn app(body_limit: usize) -> Router {
    let scheduler = BatchScheduler::new(OrderMatcher::default(), Arc::new(SequentialExecutor), 2).unwrap();
    router(AppState { scheduler }, body_limit)
}

fn payload() -> Value {
    json!({
        "orders": [
            {"customer": "Alex Abel", "orderId": "18G", "date": "2023-07-11", "item": "Tool A", "price": 1.23},
            {"customer": "Brian Bell", "orderId": "20S", "date": "2023-08-08", "item": "Toy B", "price": 3.21}
        ],
        "transactions": [
            {"customer": "Alex Abel", "orderId": "18G", "date": "2023-07-11", "item": "Tool A", "price": 1.23, "txnType": "payment", "txnAmount": 1.23},
            {"customer": "Brian Ball", "orderId": "ZOS", "date": "2023-08-11", "item": "Toy B", "price": 3.21, "txnType": "payment-1", "txnAmount": 1.21},
            {"customer": "Alex Able", "orderId": "I8G", "date": "2023-07-13", "item": "Tool A", "price": 1.23, "txnType": "refund", "txnAmount": -1.23}
        ]
    })
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn health() {
    let resp = app(1 << 20)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"OK");
}

#[tokio::test]
async fn match_returns_wire_format() {
    let resp = app(1 << 20).oneshot(post("/api/match", &payload())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["order"]["orderId"], "18G");
    assert_eq!(matches[0]["txns"][0]["txn"]["txnType"], "payment");
    assert_eq!(matches[0]["txns"][0]["score"], 1.0);
    assert_eq!(matches[0]["txns"][1]["txn"]["txnType"], "refund");
    assert_eq!(matches[1]["txns"][0]["txn"]["txnType"], "payment-1");
}

#[tokio::test]
async fn batch_route_accepts_batch_size() {
    let mut body = payload();
    body["batchSize"] = json!(1);
    let resp = app(1 << 20).oneshot(post("/api/match/batch", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let parsed: MatchResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    let counts: Vec<_> = parsed.matches.iter().map(|m| m.txns.len()).collect();
    assert_eq!(counts, [2, 1]);
}

#[tokio::test]
async fn zero_batch_size_is_bad_request() {
    let mut body = payload();
    body["batchSize"] = json!(0);
    let resp = app(1 << 20).oneshot(post("/api/match/batch", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let err: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(err["success"], false);
    assert!(err["message"].as_str().unwrap().contains("batch size"));
}

#[tokio::test]
async fn empty_orders_yield_empty_matches() {
    let body = json!({"orders": [], "transactions": payload()["transactions"].clone()});
    let resp = app(1 << 20).oneshot(post("/api/match", &body)).await.unwrap();
    let parsed: MatchResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(parsed.matches.is_empty());
}

#[tokio::test]
async fn malformed_price_is_rejected_before_matching() {
    let mut body = payload();
    body["orders"][0]["price"] = json!("one twenty three");
    let resp = app(1 << 20).oneshot(post("/api/match", &body)).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let resp = app(64).oneshot(post("/api/match", &payload())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn csv_export() {
    let resp = app(1 << 20).oneshot(post("/api/match/csv", &payload())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );

    let text = String::from_utf8(body_bytes(resp).await).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("0,Alex Abel,18G,"));
    assert!(lines[1].ends_with(",payment,1.23,1.0000"));
    assert!(lines[3].starts_with("1,Brian Bell,20S,"));
}
