//! Route definitions for the REST intake API.

mod health;
mod messages;
mod quotes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Inbound channel messages
        .route("/messages", post(messages::post_message))
        // Admin quote indexing
        .route("/quotes", post(quotes::add_quote))
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use messages::*;
pub use quotes::*;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::io::Write;
    use tower::ServiceExt;

    use banter_core::config::BotConfig;

    const QUOTE_FILE: &str = r#"[
        {"text": "Even broken clocks are right twice a day.", "category": "general"},
        {"text": "Huh?", "category": "confused"},
        {"text": "Give it a rest.", "category": "annoyed"},
        {"text": "Anyone home?", "category": "bored"}
    ]"#;

    async fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let quotes_path = dir.path().join("quotes.json");
        let mut file = std::fs::File::create(&quotes_path).unwrap();
        file.write_all(QUOTE_FILE.as_bytes()).unwrap();

        let config = BotConfig::builder()
            .index_path(dir.path().join("index"))
            .quotes_path(quotes_path)
            .build();
        let (state, _monitor) = crate::factory::build_bot(config).await.unwrap();
        (create_router(state), dir)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (router, _dir) = test_router().await;
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unaddressed_message_is_ignored_but_ok() {
        let (router, _dir) = test_router().await;
        let response = router
            .oneshot(json_post(
                "/messages",
                r#"{"sender": "alice", "text": "anyone seen my keys"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_addressed_message_gets_a_reply() {
        let (router, _dir) = test_router().await;
        let response = router
            .oneshot(json_post(
                "/messages",
                r#"{"sender": "alice", "text": "banter: broken clocks"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_quote_created() {
        let (router, _dir) = test_router().await;
        let response = router
            .oneshot(json_post(
                "/quotes",
                r#"{"text": "Fresh wisdom.", "category": "general"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_add_empty_quote_rejected() {
        let (router, _dir) = test_router().await;
        let response = router
            .oneshot(json_post("/quotes", r#"{"text": "  ", "category": "general"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
