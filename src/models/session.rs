//! Session Models
//!
//! `UserSession` is what the server keeps in the signed session cookie.
//! `AuthSession` is the session object the provider hands to the browser
//! client after a successful sign-in; the client maps it into the callback
//! form it posts back to the server.

use serde::{Deserialize, Serialize};

/// Session stored in the signed cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
}

/// Session object as emitted by the auth provider's client library
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthSessionUser>,
}

/// User part of a provider session
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<&AuthSession> for UserSession {
    fn from(session: &AuthSession) -> Self {
        let user = session.user.as_ref();

        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone().unwrap_or_default(),
            user_id: user.map(|u| u.id.clone()).unwrap_or_default(),
            email: user.and_then(|u| u.email.clone()).unwrap_or_default(),
        }
    }
}
