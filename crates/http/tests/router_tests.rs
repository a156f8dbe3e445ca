use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use valuemap_core::{AuthConfig, DatasetCollection, QueryResolver};
use valuemap_http::{AppState, create_router};

const DATA: &str = r#"{
    "colors": ["Red", "Green", "Blue"],
    "hosts": {"h1": "Host One", "h2": "Host Two"},
    "regions": {"eu": "Europe", "us": "United States", "ap": "Asia Pacific"}
}"#;

fn router(auth: AuthConfig) -> Router {
    let datasets = DatasetCollection::from_json_str(DATA).unwrap();
    let state = AppState::new(QueryResolver::new(Arc::new(datasets)), auth);
    create_router(Arc::new(state))
}

fn search_request(body: Value) -> Request<Body> {
    Request::post("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn target(query: &str) -> Value {
    json!({ "target": query })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_search_list_dataset() {
    let (status, body) = send(router(AuthConfig::disabled()), search_request(target(r#"{"data":"colors"}"#))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"text": "Red", "value": "Red"},
            {"text": "Green", "value": "Green"},
            {"text": "Blue", "value": "Blue"}
        ])
    );
}

#[tokio::test]
async fn test_search_keyed_with_contains() {
    let request = search_request(target(r#"{"data":"hosts","contains":"one"}"#));
    let (status, body) = send(router(AuthConfig::disabled()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"text": "Host One", "value": "h1"}]));
}

#[tokio::test]
async fn test_search_id_set() {
    let request = search_request(target(r#"{"data":"regions","id":"(us|missing|eu|us)"}"#));
    let (status, body) = send(router(AuthConfig::disabled()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"text": "United States", "value": "us"},
            {"text": "Europe", "value": "eu"}
        ])
    );
}

#[tokio::test]
async fn test_search_without_target_returns_empty_array() {
    for body in [
        json!({}),
        json!({"target": ""}),
        json!({"target": null}),
        json!({"target": false}),
        json!({"target": 0}),
    ] {
        let (status, response) = send(router(AuthConfig::disabled()), search_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!([]));
    }

    let empty = Request::post("/search").body(Body::empty()).unwrap();
    let (status, response) = send(router(AuthConfig::disabled()), empty).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!([]));
}

#[tokio::test]
async fn test_search_errors() {
    let cases = [
        (target("plainmetricname"), "query should be a JSON object"),
        (json!({"target": 5}), "query should be a JSON object"),
        (target(r#"{"data":"missing"}"#), "no data found for data target: missing"),
        (target(r#"{"contains":"x"}"#), "\"data\" must be a string"),
    ];
    for (body, message) in cases {
        let (status, response) = send(router(AuthConfig::disabled()), search_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": message}));
    }
}

#[tokio::test]
async fn test_search_malformed_target_surfaces_parser_message() {
    let (status, response) = send(router(AuthConfig::disabled()), search_request(target("{not json"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = response["error"].as_str().unwrap();
    assert!(message.contains("line 1 column"), "unexpected message: {message}");
}

fn authed_router() -> Router {
    router(AuthConfig::new(Some("grafana".to_owned()), Some("s3cret".to_owned())))
}

fn with_basic(mut request: Request<Body>, credentials: &str) -> Request<Body> {
    let value = format!("Basic {}", BASE64.encode(credentials));
    request.headers_mut().insert(header::AUTHORIZATION, value.parse().unwrap());
    request
}

#[tokio::test]
async fn test_gate_rejects_missing_credentials() {
    let (status, body) = send(authed_router(), search_request(target(r#"{"data":"colors"}"#))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Access Denied"}));
}

#[tokio::test]
async fn test_gate_rejects_wrong_password() {
    let request = with_basic(search_request(target(r#"{"data":"colors"}"#)), "grafana:nope");
    let (status, body) = send(authed_router(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Access Denied"}));
}

#[tokio::test]
async fn test_gate_passes_valid_credentials() {
    let request = with_basic(search_request(target(r#"{"data":"hosts","id":"h2"}"#)), "grafana:s3cret");
    let (status, body) = send(authed_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"text": "Host Two", "value": "h2"}]));
}

#[tokio::test]
async fn test_gate_only_guards_search() {
    let app = authed_router();
    let response = app.clone().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_index_page_lists_datasets() {
    let response = router(AuthConfig::disabled())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Grafana SimpleJSON Value Mapper"));
    for name in ["colors", "hosts", "regions"] {
        assert!(page.contains(&format!("<code>{name}</code>")), "missing {name}");
    }
}
