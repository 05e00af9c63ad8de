//! Error Handling Utilities
//!
//! Error types surfaced by the auth routes. Callers only ever see two kinds:
//! invalid input (400) and a failed external operation (500), each with a
//! short machine-readable code in the JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::service::{AuthProviderError, UserServiceError};

/// Error codes returned to the browser
pub mod codes {
    pub const INVALID_TOKEN: &str = "invalid-token";
    pub const USER_LOOKUP_ERROR: &str = "user-lookup-error";
    pub const CREATE_USER_ERROR: &str = "create-user-error";
    pub const INVALID_EMAIL: &str = "invalid-email";
    pub const UNABLE_TO_SEND_MAGIC_LINK: &str = "unable-to-send-magic-link";
    pub const INTERNAL_ERROR: &str = "internal-error";
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// OAuth callback form failed to parse or validate
    #[error("Invalid OAuth callback payload: {0}")]
    InvalidToken(String),

    /// Magic link form failed to parse or validate
    #[error("Invalid magic link request: {0}")]
    InvalidEmail(String),

    /// Looking up the user record failed
    #[error("User lookup failed: {0}")]
    UserLookup(#[source] UserServiceError),

    /// Creating the user record failed
    #[error("User creation failed: {0}")]
    CreateUser(#[source] UserServiceError),

    /// The auth provider could not send the magic link
    #[error("Magic link dispatch failed: {0}")]
    MagicLink(#[from] AuthProviderError),

    /// Generic internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error body
///
/// The callback route reports under `message`, the magic link route under
/// `error`; exactly one of the two is set.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(code: &str) -> Self {
        Self {
            message: Some(code.to_string()),
            error: None,
        }
    }

    pub fn error(code: &str) -> Self {
        Self {
            message: None,
            error: Some(code.to_string()),
        }
    }
}

impl AppError {
    /// HTTP status and body for this error
    pub fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::InvalidToken(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::message(codes::INVALID_TOKEN),
            ),
            AppError::InvalidEmail(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::error(codes::INVALID_EMAIL),
            ),
            AppError::UserLookup(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(codes::USER_LOOKUP_ERROR),
            ),
            AppError::CreateUser(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(codes::CREATE_USER_ERROR),
            ),
            AppError::MagicLink(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::error(codes::UNABLE_TO_SEND_MAGIC_LINK),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(codes::INTERNAL_ERROR),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("Rejected request: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;

/// Helper trait for converting other error types to AppError
pub trait IntoAppError<T> {
    fn into_app_error(self, context: &str) -> AppResult<T>;
}

impl<T, E> IntoAppError<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn into_app_error(self, context: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", context, e)))
    }
}
