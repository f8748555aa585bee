use crate::e2e::helpers;

use helpers::{spawn_app, TestContext};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_demo_mode_as_ready(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("status"), Some("ready"));
    assert_eq!(response.str_field("database"), Some("not_configured"));
    assert_eq!(response.str_field("summarizer"), Some("available"));
    assert_eq!(response.str_field("auth"), Some("not_configured"));
}

#[tokio::test]
async fn it_should_report_missing_summarizer() {
    let client = spawn_app(&[]).await.unwrap();

    let response = client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("summarizer"), Some("not_configured"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_distinct_request_ids(ctx: &TestContext) {
    let first = ctx.client.get("/health").await.unwrap();
    let second = ctx.client.get("/health").await.unwrap();

    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {
    let requests = (0..10).map(|_| {
        let client = ctx.client.clone();
        async move { client.get("/health").await }
    });

    for result in futures::future::join_all(requests).await {
        result.unwrap().assert_status(StatusCode::OK);
    }
}
