use crate::e2e::helpers;

use helpers::{spawn_app, test_config, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use token_relay::infrastructure::config::ClientSecret;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({ "status": "ok", "message": "Token Relay active" }))
    );
}

#[tokio::test]
async fn it_should_report_healthy_without_provider_configuration() {
    let config = token_relay::infrastructure::config::Config {
        provider_domain: String::new(),
        provider_base_url: "https://".to_string(),
        client_id: String::new(),
        client_secret: ClientSecret::new(""),
        ..test_config()
    };
    let client = spawn_app(config).await.unwrap();

    let response = client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn it_should_use_configured_service_name() {
    let config = token_relay::infrastructure::config::Config {
        service_name: "RTool Auth Server".to_string(),
        ..test_config()
    };
    let client = spawn_app(config).await.unwrap();

    let response = client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().and_then(|b| b.get("message")),
        Some(&json!("RTool Auth Server active"))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.post_empty("/api/auth/token").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_caller_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "trace-abc-123")])
        .await
        .unwrap();

    assert_eq!(
        response.header("x-request-id").map(String::as_str),
        Some("trace-abc-123")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_cross_origin_requests(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("Origin", "http://localhost:3000")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header_exists("access-control-allow-origin");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {
    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = ctx.client.clone();
        futures.push(async move { client.get("/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}
