//! API Route Definitions
//!
//! HTTP routes and their handlers, assembled through a builder so a
//! deployment can expose only the endpoints it needs.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health_check, AppState};
use super::magic_link_handlers::send_magic_link;
use super::oauth_handlers::{oauth_callback_action, oauth_callback_loader};

/// Builder for creating API routes with configurable endpoints
#[derive(Default)]
pub struct RouterBuilder {
    /// Whether to enable the health check endpoint (GET /health)
    health_check: bool,
    /// Whether to enable the OAuth callback page guard and form post
    /// (GET/POST /oauth/callback)
    oauth_callback: bool,
    /// Whether to enable the magic link endpoint (POST /send-magic-link)
    magic_link: bool,
}

impl RouterBuilder {
    /// Creates a new router builder with all routes disabled by default
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router builder with all routes enabled
    pub fn with_all_routes() -> Self {
        Self {
            health_check: true,
            oauth_callback: true,
            magic_link: true,
        }
    }

    /// Creates a router with minimal routes for monitoring
    ///
    /// Only includes the health check endpoint.
    pub fn with_minimal_routes() -> Self {
        Self {
            health_check: true,
            ..Self::default()
        }
    }

    /// Enable or disable the health check endpoint
    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Enable or disable the OAuth callback endpoints
    pub fn oauth_callback(mut self, enabled: bool) -> Self {
        self.oauth_callback = enabled;
        self
    }

    /// Enable or disable the magic link endpoint
    pub fn magic_link(mut self, enabled: bool) -> Self {
        self.magic_link = enabled;
        self
    }

    /// Build the router with the configured endpoints
    pub fn build(self) -> Router<AppState> {
        let mut router = Router::new();

        if self.health_check {
            router = router.route("/health", get(health_check));
        }

        if self.oauth_callback {
            router = router.route(
                "/oauth/callback",
                get(oauth_callback_loader).post(oauth_callback_action),
            );
        }

        if self.magic_link {
            router = router.route("/send-magic-link", post(send_magic_link));
        }

        router
    }
}

/// Router with every endpoint enabled
pub fn create_routes() -> Router<AppState> {
    RouterBuilder::with_all_routes().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[test]
    fn test_router_builder_new() {
        let builder = RouterBuilder::new();

        assert!(!builder.health_check);
        assert!(!builder.oauth_callback);
        assert!(!builder.magic_link);
    }

    #[test]
    fn test_router_builder_with_all_routes() {
        let builder = RouterBuilder::with_all_routes();

        assert!(builder.health_check);
        assert!(builder.oauth_callback);
        assert!(builder.magic_link);
    }

    #[test]
    fn test_router_builder_with_minimal_routes() {
        let builder = RouterBuilder::with_minimal_routes();

        assert!(builder.health_check);
        assert!(!builder.oauth_callback);
        assert!(!builder.magic_link);
    }

    #[test]
    fn test_router_builder_toggles() {
        let builder = RouterBuilder::new().oauth_callback(true).magic_link(true);

        assert!(!builder.health_check);
        assert!(builder.oauth_callback);
        assert!(builder.magic_link);
    }

    #[tokio::test]
    async fn test_disabled_route_is_not_found() {
        let state = AppState::new(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(RecordingAuthProvider::default()),
            Arc::new(test_session_service()),
        );
        let app = RouterBuilder::with_minimal_routes().build().with_state(state);

        let response = app
            .oneshot(form_request("/send-magic-link", "email=ada%40example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_callback_rejects_other_methods() {
        let app = test_app(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(RecordingAuthProvider::default()),
        );

        let request = Request::builder()
            .method("DELETE")
            .uri("/oauth/callback")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
