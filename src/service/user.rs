//! User Service Implementation
//!
//! Lookup and creation of the user rows backing OAuth and magic-link
//! sign-ins.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::user::User;
use crate::utils::validation::{normalize_email, validate_email};

/// Custom error types for the user service
#[derive(Error, Debug)]
pub enum UserServiceError {
    /// A user with this id or email already exists
    #[error("User already exists")]
    UserAlreadyExists,

    /// Input validation failed with detailed error message
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result type for user service operations
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Storage of user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user registered under an email address, if any
    async fn get_user_by_email(&self, email: &str) -> UserServiceResult<Option<User>>;

    /// Create the record for a user first seen through the auth provider
    async fn create_oauth_user(&self, user_id: &str, email: &str) -> UserServiceResult<User>;

    /// Check that the store is reachable
    async fn health_check(&self) -> UserServiceResult<()>;
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct UserService {
    db_pool: PgPool,
}

impl UserService {
    /// Creates a new UserService instance with the provided database connection pool
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserStore for UserService {
    async fn get_user_by_email(&self, email: &str) -> UserServiceResult<Option<User>> {
        let normalized_email = normalize_email(email);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalized_email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn create_oauth_user(&self, user_id: &str, email: &str) -> UserServiceResult<User> {
        if user_id.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "User id cannot be empty".to_string(),
            ));
        }

        let normalized_email = normalize_email(email);
        if !validate_email(&normalized_email) {
            return Err(UserServiceError::ValidationError(format!(
                "Invalid email address: {}",
                email
            )));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email)
            VALUES ($1, $2)
            RETURNING id, email, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&normalized_email)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserServiceError::UserAlreadyExists
            }
            _ => UserServiceError::DatabaseError(e),
        })?;

        log::info!("Created user {} for {}", user.id, user.email);

        Ok(user)
    }

    async fn health_check(&self) -> UserServiceResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .map_err(UserServiceError::DatabaseError)?;

        Ok(())
    }
}
