//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route sits behind the access gate. Pages reach the backend only
//! through the [`Backend`] extractor, which builds an API client on top of the
//! per-request cookie relay the gate set up.

pub mod auth;
pub mod html;
pub mod pages;

use axum::Router;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::api::{ApiClient, ApiError, ApiReply};
use crate::context::RequestContext;
use crate::gate::{self, LOGIN_PATH};
use crate::state::AppState;

/// Gateway router: pages, public probes, gate, and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::home))
        .route("/auth/login", get(auth::login_form).post(auth::login_submit))
        .route("/auth/logout", get(auth::logout))
        .route("/api/public/health", get(healthz))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), gate::access_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> PageError {
    PageError::NotFound
}

// =============================================================================
// BACKEND EXTRACTOR
// =============================================================================

/// Backend API client bound to the current request's cookie relay.
pub struct Backend(pub ApiClient);

impl<S> FromRequestParts<S> for Backend
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(context) = parts.extensions.get::<RequestContext>().cloned() else {
            return Err(PageError::MissingContext);
        };
        Ok(Self(AppState::from_ref(state).api_for(context)))
    }
}

// =============================================================================
// PAGE ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("backend rejected the session")]
    Unauthorized,
    #[error("backend denied access")]
    Forbidden,
    #[error("backend returned no usable data")]
    MissingData,
    #[error("page not found")]
    NotFound,
    #[error("request bypassed the access gate")]
    MissingContext,
    #[error("backend call failed: {0}")]
    Upstream(#[from] ApiError),
}

pub(crate) fn page_error_to_status(err: &PageError) -> StatusCode {
    match err {
        PageError::Unauthorized => StatusCode::FOUND,
        PageError::Forbidden => StatusCode::FORBIDDEN,
        PageError::NotFound => StatusCode::NOT_FOUND,
        PageError::MissingData | PageError::MissingContext => StatusCode::INTERNAL_SERVER_ERROR,
        PageError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match &self {
            // The backend is the authority on sessions: a stale cookie goes back to login.
            Self::Unauthorized => return gate::found(LOGIN_PATH),
            Self::Upstream(e) => tracing::error!(error = %e, "backend call failed"),
            Self::MissingContext | Self::MissingData => tracing::error!(error = %self, "page failed"),
            Self::Forbidden | Self::NotFound => {}
        }
        let status = page_error_to_status(&self);
        let reason = status.canonical_reason().unwrap_or("Error");
        (status, Html(html::error_page(status.as_u16(), reason))).into_response()
    }
}

/// Unwrap a backend reply for a page: 401 and 403 become page errors, and a
/// missing body becomes a 500.
pub(crate) fn require_data<T>(reply: ApiReply<T>) -> Result<T, PageError> {
    match reply.response.status {
        StatusCode::UNAUTHORIZED => Err(PageError::Unauthorized),
        StatusCode::FORBIDDEN => Err(PageError::Forbidden),
        _ => reply.data.ok_or(PageError::MissingData),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
