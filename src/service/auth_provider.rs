//! Auth Provider Client
//!
//! Client for the hosted auth service (Supabase/GoTrue-compatible API).
//! Only magic-link dispatch goes through the server; OAuth sign-ins complete
//! in the browser and arrive at the callback route as a form post.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::AuthProviderConfig;

/// Path of the page magic links land on
pub const CALLBACK_PATH: &str = "/oauth/callback";

const MAGIC_LINK_PATH: &str = "/auth/v1/magiclink";

/// Errors talking to the auth provider
#[derive(Error, Debug)]
pub enum AuthProviderError {
    /// Transport-level failure (connect, timeout, TLS, decode)
    #[error("Auth provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Auth provider rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// A configured base URL could not be used
    #[error("Invalid auth provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for auth provider operations
pub type AuthProviderResult<T> = Result<T, AuthProviderError>;

/// Operations delegated to the hosted auth service
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Email a one-time sign-in link to `email`
    ///
    /// `redirect_to` is the page the user should reach once signed in; it
    /// travels through the callback page's query string.
    async fn send_magic_link(&self, email: &str, redirect_to: Option<&str>)
        -> AuthProviderResult<()>;
}

#[derive(Debug, Serialize)]
struct MagicLinkRequest<'a> {
    email: &'a str,
}

/// HTTP client for a Supabase/GoTrue auth endpoint
pub struct SupabaseAuthService {
    http: reqwest::Client,
    base_url: Url,
    server_url: Url,
    service_role_key: String,
}

impl SupabaseAuthService {
    pub fn new(config: &AuthProviderConfig) -> AuthProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.url)?,
            server_url: Url::parse(&config.server_url)?,
            service_role_key: config.service_role_key.clone(),
        })
    }

    /// Where the emailed link sends the browser: the callback page, carrying
    /// the final destination as `redirectTo`
    pub fn magic_link_redirect(&self, redirect_to: Option<&str>) -> AuthProviderResult<Url> {
        let mut url = self.server_url.join(CALLBACK_PATH)?;

        if let Some(redirect_to) = redirect_to.filter(|r| !r.is_empty()) {
            url.query_pairs_mut().append_pair("redirectTo", redirect_to);
        }

        Ok(url)
    }

    /// Full provider endpoint for a magic-link request
    pub fn magic_link_endpoint(&self, redirect_to: Option<&str>) -> AuthProviderResult<Url> {
        let mut endpoint = self.base_url.join(MAGIC_LINK_PATH)?;
        let redirect = self.magic_link_redirect(redirect_to)?;

        endpoint
            .query_pairs_mut()
            .append_pair("redirect_to", redirect.as_str());

        Ok(endpoint)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthService {
    async fn send_magic_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> AuthProviderResult<()> {
        let endpoint = self.magic_link_endpoint(redirect_to)?;

        log::debug!("Requesting magic link for {}", email);

        let response = self
            .http
            .post(endpoint)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&MagicLinkRequest { email })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            log::info!("Magic link sent to {}", email);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!(
            "Auth provider refused magic link for {} ({}): {}",
            email,
            status,
            body
        );

        Err(AuthProviderError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
