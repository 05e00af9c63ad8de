//! Request and Response Models
//!
//! Form payloads posted by the browser, with validation, and the small JSON
//! bodies returned on success.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use validator::Validate;

use crate::models::session::{AuthSession, UserSession};
use crate::utils::validation::{email_validator, DEFAULT_REDIRECT};

/// Form posted to the OAuth callback once the browser client sees a sign-in
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCallbackForm {
    /// Access token issued by the auth provider
    pub access_token: String,

    /// Refresh token issued by the auth provider
    pub refresh_token: String,

    /// Provider user id
    pub user_id: String,

    /// Email the provider authenticated
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    /// Where to send the user afterwards
    #[serde(default)]
    pub redirect_to: Option<String>,
}

impl OAuthCallbackForm {
    /// Build the form the callback page submits for a provider session
    ///
    /// Missing provider values become empty strings and the redirect target
    /// defaults to the notes page, mirroring what the page posts.
    pub fn from_auth_session(session: &AuthSession, redirect_to: Option<&str>) -> Self {
        let user_session = UserSession::from(session);

        Self {
            access_token: user_session.access_token,
            refresh_token: user_session.refresh_token,
            user_id: user_session.user_id,
            email: user_session.email,
            redirect_to: Some(redirect_to.unwrap_or(DEFAULT_REDIRECT).to_string()),
        }
    }

    /// Encode as an `application/x-www-form-urlencoded` body
    pub fn to_form_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("accessToken", &self.access_token)
            .append_pair("refreshToken", &self.refresh_token)
            .append_pair("userId", &self.user_id)
            .append_pair("email", &self.email);

        if let Some(redirect_to) = &self.redirect_to {
            serializer.append_pair("redirectTo", redirect_to);
        }

        serializer.finish()
    }

    /// Split into the session to persist and the requested redirect target
    pub fn into_parts(self) -> (UserSession, Option<String>) {
        let session = UserSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user_id,
            email: self.email,
        };

        (session, self.redirect_to)
    }
}

/// Form posted to request a magic link
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MagicLinkForm {
    /// Address to send the link to
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    /// Page to land on after following the link
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// Response for health check
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
