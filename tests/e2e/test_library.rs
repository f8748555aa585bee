use crate::e2e::helpers;

use helpers::fixtures::article_text;
use helpers::DbTestContext;
use hyper::StatusCode;
use serde_json::json;
use serial_test::serial;
use test_context::test_context;
use uuid::Uuid;

fn article_item(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "content": article_text(),
        "url": "https://example.com/articles/timing",
        "content_type": "url",
    })
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_save_and_fetch_content(ctx: &DbTestContext) {
    let user = ctx.fixtures.create_user(Some("ada@example.com"), false).await.unwrap();
    let token = ctx.fixtures.token_for(&user);

    let response = ctx
        .client
        .post_with_auth("/api/library", &article_item("Timing"), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    let id = response.str_field("id").unwrap().to_string();

    let response = ctx
        .client
        .get_with_auth(&format!("/api/library/{}", id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.str_field("title"), Some("Timing"));
    assert_eq!(response.str_field("content_type"), Some("url"));
    assert_eq!(
        response.str_field("url"),
        Some("https://example.com/articles/timing")
    );
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_list_most_recently_accessed_first(ctx: &DbTestContext) {
    let user = ctx.fixtures.create_user(None, true).await.unwrap();
    let token = ctx.fixtures.token_for(&user);

    let mut ids = Vec::new();
    for title in ["First", "Second"] {
        let response = ctx
            .client
            .post_with_auth("/api/library", &article_item(title), &token)
            .await
            .unwrap();
        ids.push(response.str_field("id").unwrap().to_string());
    }

    let response = ctx
        .client
        .put_with_auth(&format!("/api/library/{}/accessed", ids[0]), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get_with_auth("/api/library", &token).await.unwrap();
    response.assert_status(StatusCode::OK);
    let titles: Vec<&str> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_hide_other_users_content(ctx: &DbTestContext) {
    let owner = ctx.fixtures.create_user(Some("owner@example.com"), false).await.unwrap();
    let other = ctx.fixtures.create_user(Some("other@example.com"), false).await.unwrap();
    let owner_token = ctx.fixtures.token_for(&owner);
    let other_token = ctx.fixtures.token_for(&other);

    let response = ctx
        .client
        .post_with_auth("/api/library", &article_item("Private"), &owner_token)
        .await
        .unwrap();
    let path = format!("/api/library/{}", response.str_field("id").unwrap());

    let response = ctx.client.get_with_auth(&path, &other_token).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.delete_with_auth(&path, &other_token).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.fixtures.saved_content_count(owner.id).await.unwrap(), 1);
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_delete_content(ctx: &DbTestContext) {
    let user = ctx.fixtures.create_user(Some("ada@example.com"), false).await.unwrap();
    let token = ctx.fixtures.token_for(&user);
    let response = ctx
        .client
        .post_with_auth("/api/library", &article_item("Gone soon"), &token)
        .await
        .unwrap();
    let path = format!("/api/library/{}", response.str_field("id").unwrap());

    let response = ctx.client.delete_with_auth(&path, &token).await.unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get_with_auth(&path, &token).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.fixtures.saved_content_count(user.id).await.unwrap(), 0);
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_require_a_bearer_token(ctx: &DbTestContext) {
    let response = ctx.client.get("/api/library").await.unwrap();
    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");

    let response = ctx
        .client
        .get_with_auth(&format!("/api/library/{}", Uuid::new_v4()), "garbage")
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(DbTestContext)]
#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn it_should_validate_saved_content(ctx: &DbTestContext) {
    let user = ctx.fixtures.create_user(None, true).await.unwrap();
    let token = ctx.fixtures.token_for(&user);

    let response = ctx
        .client
        .post_with_auth(
            "/api/library",
            &json!({ "title": "  ", "content": "text", "content_type": "pdf" }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}
