use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_plan_playback_at_default_rate(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/playback/plan", &json!({ "content": words(300) }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["wordCount"], 300);
    assert_eq!(body["rate"], 1.0);
    assert_eq!(body["wordsPerMinute"], 150.0);
    assert_eq!(body["estimatedDurationSecs"], 120.0);
    assert_eq!(body["estimatedDuration"], "2:00");
    assert_eq!(body["wordIntervalMs"], 400);
    assert_eq!(body["skipWords"], 25);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_scale_plan_with_rate(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/playback/plan",
            &json!({ "content": words(300), "rate": 2.0 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["estimatedDuration"], "1:00");
    assert_eq!(body["wordIntervalMs"], 200);
    assert_eq!(body["skipWords"], 50);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_plan_empty_content(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/playback/plan", &json!({ "content": "   " }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["wordCount"], 0);
    assert_eq!(response.json()["estimatedDuration"], "0:00");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_positive_rate(ctx: &TestContext) {
    for rate in [0.0, -1.5] {
        let response = ctx
            .client
            .post(
                "/api/playback/plan",
                &json!({ "content": "hello there", "rate": rate }),
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("rate must be a positive number");
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_rates_outside_the_timer_range(ctx: &TestContext) {
    for rate in [1e-20, 1e12] {
        let response = ctx
            .client
            .post(
                "/api/playback/plan",
                &json!({ "content": "hello world", "rate": rate }),
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("out of range");
    }
}
