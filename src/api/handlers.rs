//! HTTP Request Handlers
//!
//! Shared application state and the handlers common to every deployment.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::Key;
use chrono::Utc;

use crate::{
    models::requests::HealthCheckResponse,
    service::{AuthProvider, SessionService, UserStore},
    utils::error::{AppResult, IntoAppError},
    VERSION,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub session_service: Arc<SessionService>,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        auth_provider: Arc<dyn AuthProvider>,
        session_service: Arc<SessionService>,
    ) -> Self {
        Self {
            user_store,
            auth_provider,
            session_service,
        }
    }
}

// Lets handlers take a `SignedCookieJar` extractor directly
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_service.key()
    }
}

/// Standard success response wrapper
#[derive(serde::Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `302 Found` redirect to a same-site location
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<HealthCheckResponse>>> {
    state
        .user_store
        .health_check()
        .await
        .into_app_error("Health check failed")?;

    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    };

    Ok(Json(SuccessResponse::new(response)))
}
