use anyhow::Result;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::{json, Value};
use speakit_backend::domain::auth::JwtManager;
use speakit_backend::domain::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use super::TEST_JWT_SECRET;

pub const ARTICLE_TITLE: &str = "How Speech Engines Keep Time";

const ARTICLE_SENTENCE: &str =
    "A narration engine reports word boundaries late, so players estimate progress from a words per minute model instead.";

/// An article page with navigation chrome around a long body
pub fn article_html() -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
  <title>Site | {ARTICLE_TITLE}</title>
  <meta name="author" content="Grace Hopper">
  <meta property="article:published_time" content="2024-05-01T08:30:00Z">
</head>
<body>
  <nav>Home Archive About</nav>
  <article>
    <h1>{ARTICLE_TITLE}</h1>
    <p>{body}</p>
  </article>
  <footer>All rights reserved</footer>
</body>
</html>"#,
        body = vec![ARTICLE_SENTENCE; 4].join(" ")
    )
}

/// Long enough to be accepted as article content
pub fn article_text() -> String {
    vec![ARTICLE_SENTENCE; 3].join(" ")
}

/// A one-line-per-page Helvetica PDF
pub fn build_pdf(title: Option<&str>, pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|text| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 11.into()]),
                    Operation::new("Td", vec![40.into(), 760.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let stream = Stream::new(dictionary! {}, content.encode().unwrap());
            let content_id = doc.add_object(stream);
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! { "Title" => Object::string_literal(title) });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Minimal chat-completions answer
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54 }
    })
}

/// Identity Toolkit account answer
pub fn identity_account(local_id: &str, email: Option<&str>) -> Value {
    let mut body = json!({
        "kind": "identitytoolkit#SignupNewUserResponse",
        "localId": local_id,
        "idToken": "provider-id-token",
        "refreshToken": "provider-refresh-token",
        "expiresIn": "3600"
    });
    if let Some(email) = email {
        body["email"] = json!(email);
    }
    body
}

pub fn identity_error(code: &str) -> Value {
    json!({ "error": { "code": 400, "message": code } })
}

pub struct TestFixtures {
    pool: PgPool,
}

#[allow(dead_code)]
impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, email: Option<&str>, is_guest: bool) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            identity_provider_id: format!("provider_{}", Uuid::new_v4().simple()),
            email: email.map(str::to_string),
            is_guest,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, identity_provider_id, email, is_guest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.identity_provider_id)
        .bind(&user.email)
        .bind(user.is_guest)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Access token for `user`, signed with the test secret
    pub fn token_for(&self, user: &User) -> String {
        JwtManager::new(TEST_JWT_SECRET.to_string(), 1)
            .generate_token(user)
            .unwrap()
    }

    pub async fn saved_content_count(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM saved_content WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
