//! Notes Auth
//!
//! Server-side authentication routes for the notes web app. Sign-in itself
//! is handled by a hosted auth service (Supabase/GoTrue-compatible); this
//! crate provides the two server touch points around it:
//!
//! - **OAuth callback** (`GET`/`POST /oauth/callback`): receives the
//!   provider session posted by the callback page, creates the user row on
//!   first sign-in and stores the tokens in a signed session cookie.
//! - **Magic link** (`POST /send-magic-link`): validates an email address
//!   and asks the provider to email a one-time sign-in link.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use notes_auth::{
//!     api::{AppState, RouterBuilder},
//!     config::AppConfig,
//!     database,
//!     service::{SessionService, SupabaseAuthService, UserService},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     config.validate()?;
//!
//!     let pool = database::create_pool(&config.database).await?;
//!     let state = AppState::new(
//!         Arc::new(UserService::new(pool)),
//!         Arc::new(SupabaseAuthService::new(&config.auth)?),
//!         Arc::new(SessionService::new(&config.session)?),
//!     );
//!
//!     let app = RouterBuilder::with_all_routes().build().with_state(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **API Layer**: handlers, shared state and the route builder
//! - **Service Layer**: user store, auth provider client, session cookie
//! - **Models**: form payloads, session shapes and the user row
//! - **Database**: connection pool and migrations
//! - **Utils**: error type and validation helpers

/// HTTP API layer with handlers and configurable routing
pub mod api;

/// Configuration loaded from the environment
pub mod config;

/// Database connection management
pub mod database;

/// Data models and request/response structures
pub mod models;

/// User store, auth provider and session services
pub mod service;

/// Shared utilities for validation and error handling
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{create_routes, AppState, RouterBuilder};
pub use config::{AppConfig, AuthProviderConfig, ConfigError, SessionConfig};
pub use models::{AuthSession, MagicLinkForm, OAuthCallbackForm, User, UserSession};
pub use service::{
    AuthProvider, SessionService, SupabaseAuthService, UserService, UserStore,
};
pub use utils::error::{AppError, AppResult, ErrorResponse};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
