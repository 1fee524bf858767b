//! Access gate — the per-request auth decision, run before any page logic.
//!
//! SECURITY BOUNDARY
//! =================
//! The gate only checks that the session cookie is *present*. It never reads
//! or validates the value, so it is a navigation convenience and not
//! authentication. The backend validates the cookie on every protected call;
//! pages must still handle a backend 401/403.
//!
//! LIFECYCLE
//! =========
//! Unclassified -> Classified(Public | Protected) -> Allowed | Redirected.
//! A redirected request never reaches a handler, so no backend call happens.
//! An allowed request gets a [`RequestContext`] in its extensions; once the
//! handler returns, the cookie writes the relay queued on that context are
//! appended to the response as `Set-Cookie` headers, and preload hints are
//! filtered.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::Cookie;

use crate::context::{LoginStatus, PendingCookies, RequestContext, inbound_cookie_header};
use crate::preload;
use crate::state::AppState;

/// Where logged-out visitors of protected routes are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path prefixes reachable without a session cookie.
pub const PUBLIC_PREFIXES: [&str; 2] = ["/auth", "/api/public"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

impl RouteClass {
    #[must_use]
    pub fn of(path: &str) -> Self {
        if PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
            Self::Public
        } else {
            Self::Protected
        }
    }
}

/// Terminal state of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Redirected,
}

#[must_use]
pub fn decide(route: RouteClass, login_status: LoginStatus) -> GateDecision {
    match (route, login_status) {
        (RouteClass::Public, _) | (RouteClass::Protected, LoginStatus::LoggedIn) => GateDecision::Allowed,
        (RouteClass::Protected, LoginStatus::LoggedOut) => GateDecision::Redirected,
    }
}

/// Logged in iff a cookie named `cookie_name` is present. The value is not
/// inspected. A `Cookie` header that is not valid text counts as logged out.
#[must_use]
pub fn detect_login_status(headers: &HeaderMap, cookie_name: &str) -> LoginStatus {
    let mut found = false;
    for value in headers.get_all(header::COOKIE) {
        let Ok(text) = value.to_str() else {
            return LoginStatus::LoggedOut;
        };
        found |= Cookie::split_parse(text)
            .filter_map(Result::ok)
            .any(|cookie| cookie.name() == cookie_name);
    }
    if found { LoginStatus::LoggedIn } else { LoginStatus::LoggedOut }
}

/// `302 Found` to `location`.
#[must_use]
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, HeaderValue::from_static(location))]).into_response()
}

/// Axum middleware implementing the gate. Install with
/// `axum::middleware::from_fn_with_state(state, access_gate)`.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let login_status = detect_login_status(request.headers(), &state.config.session_cookie_name);
    let route = RouteClass::of(&path);

    if decide(route, login_status) == GateDecision::Redirected {
        tracing::debug!(%path, "no session cookie on protected route; redirecting to login");
        return found(LOGIN_PATH);
    }

    let context = RequestContext::new(login_status, path, inbound_cookie_header(request.headers()));
    let pending = context.pending.clone();
    tracing::debug!(
        request_id = %context.id,
        path = %context.path,
        login_status = login_status.as_str(),
        ?route,
        "request allowed"
    );
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    preload::filter_preload_hints(response.headers_mut());
    apply_pending_cookies(&pending, response.headers_mut());
    response
}

/// Append every queued cookie write to `headers` as `Set-Cookie`.
pub fn apply_pending_cookies(pending: &PendingCookies, headers: &mut HeaderMap) {
    for cookie in pending.drain() {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => {
                tracing::warn!(cookie = cookie.name(), error = %e, "cookie write is not a valid header value");
            }
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
