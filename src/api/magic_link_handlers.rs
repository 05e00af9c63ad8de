//! Magic Link Handler

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use serde_json::{json, Value as JsonValue};
use validator::Validate;

use crate::{
    models::requests::MagicLinkForm,
    utils::{
        error::{AppError, AppResult},
        validation::normalize_email,
    },
};

use super::handlers::AppState;

/// Handler for magic-link requests
///
/// **Endpoint:** `POST /send-magic-link`
///
/// **Form fields:** `email`, optional `redirectTo`.
///
/// Responds `200 {}` once the provider accepted the request,
/// `400 {"error":"invalid-email"}` for a malformed address and
/// `500 {"error":"unable-to-send-magic-link"}` when the provider fails.
pub async fn send_magic_link(
    State(state): State<AppState>,
    form: Result<Form<MagicLinkForm>, FormRejection>,
) -> AppResult<Json<JsonValue>> {
    let Form(form) = form.map_err(|e| AppError::InvalidEmail(e.body_text()))?;
    form.validate()
        .map_err(|e| AppError::InvalidEmail(e.to_string()))?;

    let email = normalize_email(&form.email);

    state
        .auth_provider
        .send_magic_link(&email, form.redirect_to.as_deref())
        .await?;

    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::util::ServiceExt;

    use crate::api::test_support::*;

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let provider = Arc::new(RecordingAuthProvider::default());
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request("/send-magic-link", "email=not-an-email"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "invalid-email" })
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_email_is_rejected() {
        let provider = Arc::new(RecordingAuthProvider::default());
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request("/send-magic-link", "redirectTo=%2Fnotes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid-email");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_local_part_is_rejected() {
        for email in ["a..b%40example.com", ".a%40example.com"] {
            let provider = Arc::new(RecordingAuthProvider::default());
            let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

            let response = app
                .oneshot(form_request("/send-magic-link", format!("email={}", email)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", email);
            assert!(provider.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_apostrophe_email_is_accepted() {
        let provider = Arc::new(RecordingAuthProvider::default());
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request("/send-magic-link", "email=O%27Brien%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            provider.calls(),
            vec![("o'brien@example.com".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn test_magic_link_sent_with_lowercased_email() {
        let provider = Arc::new(RecordingAuthProvider::default());
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request(
                "/send-magic-link",
                "email=Ada%40Example.COM&redirectTo=%2Fnotes%2Fnew",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({}));
        assert_eq!(
            provider.calls(),
            vec![(
                "ada@example.com".to_string(),
                Some("/notes/new".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_magic_link_without_redirect() {
        let provider = Arc::new(RecordingAuthProvider::default());
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request("/send-magic-link", "email=ada%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            provider.calls(),
            vec![("ada@example.com".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_server_error() {
        let provider = Arc::new(RecordingAuthProvider {
            fail: true,
            ..Default::default()
        });
        let app = test_app(Arc::new(InMemoryUserStore::default()), provider.clone());

        let response = app
            .oneshot(form_request("/send-magic-link", "email=ada%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "unable-to-send-magic-link" })
        );
        assert_eq!(provider.calls().len(), 1);
    }
}
