//! Validation Utilities
//!
//! Input validation helpers for form payloads and redirect targets.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Where signed-in users land when no usable redirect target was given
pub const DEFAULT_REDIRECT: &str = "/notes";

/// Validates email address format
///
/// The local part may contain letters, digits and `_ ' + - .`, must not
/// start with a dot or end with `.`/`'`, and never holds two dots in a row.
/// The domain is dot-separated labels ending in an alphabetic TLD.
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("Failed to compile email regex")
    });

    // regex has no lookaround
    !email.starts_with('.') && !email.contains("..") && regex.is_match(email)
}

/// Normalizes email address to lowercase and removes whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Custom validator for email fields using the validator crate
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

/// Whether a redirect target stays on this site
///
/// Only absolute paths are accepted. Protocol-relative (`//host`) and
/// backslash forms are rejected since browsers treat them as other origins.
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control)
}

/// Resolve a requested redirect target, falling back to the notes page
pub fn safe_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(target) if is_safe_redirect(target) => target.to_string(),
        _ => DEFAULT_REDIRECT.to_string(),
    }
}
