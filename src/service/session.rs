//! Session Service
//!
//! Cookie-backed session storage. The session is serialized as JSON,
//! base64-encoded and stored in a single cookie signed with a key derived
//! from the configured secret, so a client can read but never forge it.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cookie::time::Duration;

use crate::config::{ConfigError, SessionConfig, MIN_SESSION_SECRET_LEN};
use crate::models::session::UserSession;
use crate::utils::error::{AppResult, IntoAppError};

/// Reads and writes the signed session cookie
#[derive(Clone)]
pub struct SessionService {
    key: Key,
    cookie_name: String,
    secure: bool,
    max_age: Duration,
}

impl SessionService {
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        // derive_from panics below MIN_SESSION_SECRET_LEN; validate() guards it
        debug_assert!(config.secret.len() >= MIN_SESSION_SECRET_LEN);
        let key = Key::derive_from(config.secret.as_bytes());

        Ok(Self {
            key,
            cookie_name: config.cookie_name.clone(),
            secure: config.secure,
            max_age: Duration::seconds(config.max_age_seconds),
        })
    }

    /// Signing key, handed to the `SignedCookieJar` extractor
    pub fn key(&self) -> Key {
        self.key.clone()
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Session carried by the request, if any
    ///
    /// A missing cookie, a bad signature and an undecodable payload all read
    /// as "no session".
    pub fn get_user_session(&self, jar: &SignedCookieJar) -> Option<UserSession> {
        let cookie = jar.get(&self.cookie_name)?;

        match decode_session(cookie.value()) {
            Ok(session) => Some(session),
            Err(e) => {
                log::debug!("Ignoring undecodable session cookie: {}", e);
                None
            }
        }
    }

    /// Add the session cookie to the jar
    pub fn commit_user_session(
        &self,
        jar: SignedCookieJar,
        session: &UserSession,
    ) -> AppResult<SignedCookieJar> {
        let value = encode_session(session).into_app_error("Encoding session")?;

        let cookie = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.max_age);

        Ok(jar.add(cookie))
    }

    /// Expire the session cookie
    pub fn destroy_user_session(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }
}

fn encode_session(session: &UserSession) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(session)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_session(value: &str) -> Result<UserSession, String> {
    let json = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| e.to_string())?;
    serde_json::from_slice(&json).map_err(|e| e.to_string())
}
