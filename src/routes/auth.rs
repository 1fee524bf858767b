//! Auth pages — login form, login submit, logout.
//!
//! These live under `/auth`, which the gate leaves open, so logged-out
//! visitors can reach them. Session cookies are never touched here: the
//! backend's `Set-Cookie` answers flow back through the relay.

use axum::Form;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use super::{Backend, PageError, html};
use crate::api::Credentials;
use crate::gate::{LOGIN_PATH, found};

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Normalize the username (trimmed, lowercased) and require both fields.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the missing field.
    pub fn into_credentials(self) -> Result<Credentials, &'static str> {
        let username = self.username.trim().to_lowercase();
        if username.is_empty() {
            return Err("Username is required");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        Ok(Credentials { username, password: self.password })
    }
}

/// `GET /auth/login`
pub async fn login_form() -> Html<String> {
    Html(html::login_page(None, ""))
}

/// `POST /auth/login` — forward credentials, then send the browser home.
pub async fn login_submit(Backend(api): Backend, Form(form): Form<LoginForm>) -> Response {
    let typed_username = form.username.clone();
    let credentials = match form.into_credentials() {
        Ok(credentials) => credentials,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Html(html::login_page(Some(message), &typed_username))).into_response();
        }
    };

    match api.login(&credentials).await {
        Ok(response) if response.is_success() => Redirect::to("/").into_response(),
        Ok(response) => {
            tracing::info!(status = response.status.as_u16(), "login rejected by backend");
            (response.status, Html(html::login_page(Some(response.reason()), &credentials.username))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "login call failed");
            let page = html::login_page(Some("Sign-in is unavailable right now"), &credentials.username);
            (StatusCode::BAD_GATEWAY, Html(page)).into_response()
        }
    }
}

/// `GET /auth/logout` — end the backend session, then back to login.
///
/// An unreachable backend leaves the session alive and the browser's cookie
/// in place, so that case answers 502 rather than pretending to sign out.
pub async fn logout(Backend(api): Backend) -> Result<Response, PageError> {
    api.logout().await?;
    Ok(found(LOGIN_PATH))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
