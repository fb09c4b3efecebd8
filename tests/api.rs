//! Router tests: requests go through axum, data sources are wiremock servers.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use profile_summary::AppState;
use profile_summary::api::routes::create_router;
use profile_summary::config::Config;
use profile_summary::scraper::ProfileFetcher;
use profile_summary::summary::SummaryGenerator;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(server: &MockServer, scrapin_api_key: Option<&str>) -> AppState {
    let base_url = format!("{}/v1", server.uri());
    let config = Config::from_lookup(|key| match key {
        "SCRAPIN_API_KEY" => scrapin_api_key.map(str::to_string),
        "OPENAI_API_KEY" => Some("sk-test-key".to_string()),
        "OPENAI_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .expect("config should load");

    let fetcher = ProfileFetcher::with_endpoints(
        &config,
        &format!("{}/sample.json", server.uri()),
        &format!("{}/enrichment/profile", server.uri()),
    )
    .expect("fetcher should build");
    let generator = SummaryGenerator::new(&config).expect("generator should build");

    AppState {
        config: Arc::new(config),
        fetcher,
        generator,
    }
}

async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    let response = create_router(state)
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, json)
}

#[tokio::test]
async fn summary_endpoint_runs_fetch_then_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sample.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"person": {"name": "Eden Marco"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  Eden builds courses.\n"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        state_for(&server, None),
        "/api/profile/summary",
        json!({"profile_url": "https://www.linkedin.com/in/eden-marco/", "mock": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["status"], "success");
    assert_eq!(body["data"]["summary"], "Eden builds courses.");
    assert_eq!(body["data"]["model"], "gpt-5-mini");
    assert_eq!(body["data"]["mock"], true);
}

#[tokio::test]
async fn profile_endpoint_returns_null_person_when_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrichment/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        state_for(&server, Some("k1")),
        "/api/profile",
        json!({"profile_url": "https://www.linkedin.com/in/x/"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["person"], Value::Null);
    assert_eq!(body["data"]["mock"], false);
}

#[tokio::test]
async fn live_request_without_key_maps_to_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"person": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        state_for(&server, None),
        "/api/profile",
        json!({"profile_url": "https://www.linkedin.com/in/x/", "mock": false}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["meta"]["status"], "error");
    assert_eq!(body["meta"]["status_code"], 500);
    assert!(
        body["meta"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("SCRAPIN_API_KEY"))
    );
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn malformed_upstream_body_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sample.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        state_for(&server, None),
        "/api/profile",
        json!({"profile_url": "https://www.linkedin.com/in/x/", "mock": true}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["meta"]["status_code"], 502);
}
