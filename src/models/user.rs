//! User Model
//!
//! The user row created the first time someone signs in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record keyed by the auth provider's user id
///
/// Holds no credentials: tokens live only in the session cookie and the
/// provider owns authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// User id as issued by the auth provider
    pub id: String,

    /// User's email address (unique, normalized)
    pub email: String,

    /// Timestamp when the user record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user record was last modified
    pub updated_at: DateTime<Utc>,
}
