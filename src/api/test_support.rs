//! In-memory collaborators and request helpers for router tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::Utc;

use crate::{
    api::{create_routes, AppState},
    config::SessionConfig,
    models::user::User,
    service::{
        AuthProvider, AuthProviderError, AuthProviderResult, SessionService, UserServiceError,
        UserServiceResult, UserStore,
    },
    utils::validation::normalize_email,
};

pub const TEST_COOKIE_NAME: &str = "__authSession";

/// User store backed by a vector, with switchable failures
#[derive(Default)]
pub struct InMemoryUserStore {
    pub users: Mutex<Vec<User>>,
    pub fail_lookup: bool,
    pub fail_create: bool,
    pub fail_health: bool,
}

impl InMemoryUserStore {
    pub fn with_user(id: &str, email: &str) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().push(User {
            id: id.to_string(),
            email: normalize_email(email),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        store
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn find(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user_by_email(&self, email: &str) -> UserServiceResult<Option<User>> {
        if self.fail_lookup {
            return Err(UserServiceError::DatabaseError(sqlx::Error::PoolTimedOut));
        }

        let email = normalize_email(email);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_oauth_user(&self, user_id: &str, email: &str) -> UserServiceResult<User> {
        if self.fail_create {
            return Err(UserServiceError::DatabaseError(sqlx::Error::PoolTimedOut));
        }

        let mut users = self.users.lock().unwrap();
        let email = normalize_email(email);
        if users.iter().any(|u| u.id == user_id || u.email == email) {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let user = User {
            id: user_id.to_string(),
            email,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn health_check(&self) -> UserServiceResult<()> {
        if self.fail_health {
            return Err(UserServiceError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Auth provider that records magic-link requests
#[derive(Default)]
pub struct RecordingAuthProvider {
    pub calls: Mutex<Vec<(String, Option<String>)>>,
    pub fail: bool,
}

impl RecordingAuthProvider {
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for RecordingAuthProvider {
    async fn send_magic_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> AuthProviderResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), redirect_to.map(str::to_string)));

        if self.fail {
            return Err(AuthProviderError::Rejected {
                status: 500,
                body: "smtp unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub fn test_session_service() -> SessionService {
    SessionService::new(&SessionConfig {
        cookie_name: TEST_COOKIE_NAME.to_string(),
        secret: "test-session-secret-that-is-long-enough-to-sign".to_string(),
        secure: true,
        max_age_seconds: 3600,
    })
    .unwrap()
}

/// Full router over in-memory collaborators
pub fn test_app(store: Arc<InMemoryUserStore>, provider: Arc<RecordingAuthProvider>) -> Router {
    let state = AppState::new(store, provider, Arc::new(test_session_service()));
    create_routes().with_state(state)
}

pub fn form_request(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` pair of the session cookie set by a response, if any
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", TEST_COOKIE_NAME)))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
