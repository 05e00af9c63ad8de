//! OAuth Callback Handlers
//!
//! The provider returns the browser to `/oauth/callback` after an OAuth or
//! magic-link sign-in. The page's client script picks up the provider
//! session and posts it back here as a form, so the server can make sure a
//! user row exists and keep the tokens in a signed session cookie.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;
use validator::Validate;

use crate::{
    models::requests::OAuthCallbackForm,
    utils::{
        error::{AppError, AppResult},
        validation::{safe_redirect, DEFAULT_REDIRECT},
    },
};

use super::handlers::{redirect_found, AppState};

/// Page-load guard for the callback page
///
/// **Endpoint:** `GET /oauth/callback`
///
/// Visitors who already hold a session (coming back through history, or
/// typing the URL) are sent on to the notes page instead of a page that
/// waits for a sign-in event that will never come.
pub async fn oauth_callback_loader(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Response {
    if state.session_service.get_user_session(&jar).is_some() {
        return redirect_found(DEFAULT_REDIRECT);
    }

    Json(json!({})).into_response()
}

/// Handler for the callback form post
///
/// **Endpoint:** `POST /oauth/callback`
///
/// **Form fields:** `accessToken`, `refreshToken`, `userId`, `email`,
/// optional `redirectTo`.
///
/// Responds `302` to `redirectTo` (default `/notes`) with the session cookie
/// set, `400 {"message":"invalid-token"}` for a malformed form, and
/// `500 {"message":"create-user-error"}` when a first-time user cannot be
/// recorded.
pub async fn oauth_callback_action(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<OAuthCallbackForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form.map_err(|e| AppError::InvalidToken(e.body_text()))?;
    form.validate()
        .map_err(|e| AppError::InvalidToken(e.to_string()))?;

    let (user_session, redirect_to) = form.into_parts();
    let redirect_to = safe_redirect(redirect_to.as_deref());

    let existing = state
        .user_store
        .get_user_by_email(&user_session.email)
        .await
        .map_err(AppError::UserLookup)?;

    // First sign-in: record the user before handing out a session
    if existing.is_none() {
        state
            .user_store
            .create_oauth_user(&user_session.user_id, &user_session.email)
            .await
            .map_err(AppError::CreateUser)?;

        log::info!("First sign-in for user {}", user_session.user_id);
    }

    let jar = state
        .session_service
        .commit_user_session(jar, &user_session)?;

    Ok((jar, redirect_found(&redirect_to)).into_response())
}
