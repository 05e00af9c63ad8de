//! Configuration Module
//!
//! Centralized configuration management for the auth routes: server binding,
//! database pool, the hosted auth provider and the session cookie.

use thiserror::Error;
use url::Url;

/// Minimum length, in bytes, of the session signing secret
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing
    #[error("Required environment variable {0} is not set")]
    Missing(String),

    /// A value is present but unusable
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Environment variable helpers
pub mod env {
    use std::env;

    use super::ConfigError;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as boolean with default
    pub fn get_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u32 with default
    pub fn get_u32(key: &str, default: u32) -> u32 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u64 with default
    pub fn get_u64(key: &str, default: u64) -> u64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a required environment variable
    pub fn require(key: &str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
    }
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthProviderConfig,
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL of this app, used as the magic-link landing origin
    pub public_url: String,
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// Hosted auth provider (Supabase/GoTrue-compatible) configuration
#[derive(Clone)]
pub struct AuthProviderConfig {
    /// Base URL of the provider project, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service role key, sent as both `apikey` and bearer token
    pub service_role_key: String,
    /// Public base URL the magic link sends users back to
    pub server_url: String,
    pub request_timeout_seconds: u64,
}

impl std::fmt::Debug for AuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProviderConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

/// Session cookie configuration
#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: String,
    pub secure: bool,
    pub max_age_seconds: i64,
}

// Keeps the signing secret out of logs
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("secret", &"<redacted>")
            .field("secure", &self.secure)
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::get_string("SERVER_HOST", "0.0.0.0"),
            port: env::get_u16("SERVER_PORT", 3000),
            public_url: env::get_string("SERVER_URL", "http://localhost:3000"),
            cors_origins: env::get_string("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::require("DATABASE_URL")?,
            max_connections: env::get_u32("DB_MAX_CONNECTIONS", 10),
            min_connections: env::get_u32("DB_MIN_CONNECTIONS", 1),
            connect_timeout_seconds: env::get_u64("DB_CONNECT_TIMEOUT", 10),
            idle_timeout_seconds: env::get_u64("DB_IDLE_TIMEOUT", 600),
            max_lifetime_seconds: env::get_u64("DB_MAX_LIFETIME", 3600),
        })
    }
}

impl AuthProviderConfig {
    pub fn from_env(server_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::require("SUPABASE_URL")?,
            service_role_key: env::require("SUPABASE_SERVICE_ROLE")?,
            server_url: server_url.to_string(),
            request_timeout_seconds: env::get_u64("AUTH_REQUEST_TIMEOUT", 10),
        })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cookie_name: env::get_string("SESSION_COOKIE_NAME", "__authSession"),
            secret: env::require("SESSION_SECRET")?,
            secure: env::get_bool("SESSION_COOKIE_SECURE", true),
            max_age_seconds: env::get_i64("SESSION_MAX_AGE_SECONDS", 60 * 60 * 24 * 7),
        })
    }

    /// Check the settings the cookie layer cannot recover from at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::invalid(
                "SESSION_SECRET",
                format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            ));
        }

        if self.cookie_name.trim().is_empty() {
            return Err(ConfigError::invalid(
                "SESSION_COOKIE_NAME",
                "cannot be empty",
            ));
        }

        if self.max_age_seconds <= 0 {
            return Err(ConfigError::invalid(
                "SESSION_MAX_AGE_SECONDS",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load complete application configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = ServerConfig::default();
        let auth = AuthProviderConfig::from_env(&server.public_url)?;

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env()?,
            server,
            auth,
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid(
                "SERVER_PORT",
                "must be greater than 0",
            ));
        }

        Url::parse(&self.server.public_url)
            .map_err(|e| ConfigError::invalid("SERVER_URL", e.to_string()))?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "DB_MAX_CONNECTIONS",
                "must be greater than 0",
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::invalid(
                "DB_MIN_CONNECTIONS",
                "cannot be greater than DB_MAX_CONNECTIONS",
            ));
        }

        Url::parse(&self.auth.url).map_err(|e| ConfigError::invalid("SUPABASE_URL", e.to_string()))?;

        if self.auth.service_role_key.is_empty() {
            return Err(ConfigError::invalid(
                "SUPABASE_SERVICE_ROLE",
                "cannot be empty",
            ));
        }

        self.session.validate()
    }
}
