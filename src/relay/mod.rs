//! Outbound relay — every call the gateway makes to the backend.
//!
//! ARCHITECTURE
//! ============
//! Outbound calls go through the [`Transport`] trait. `ReqwestTransport` is
//! the real network client; [`CookieRelay`] is an interceptor that decorates
//! any transport with per-request cookie relay. Page handlers never build a
//! transport themselves: they receive one already wrapped, so every backend
//! call made while serving a request carries the browser's cookies out and
//! brings backend cookie directives back. Tests substitute a mock transport
//! underneath the relay.

pub mod cookie_relay;
pub mod transport;

#[cfg(test)]
pub mod test_helpers;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use cookie_relay::CookieRelay;
pub use transport::ReqwestTransport;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while issuing an outbound call.
///
/// A non-2xx backend status is not an error here: it is returned as a normal
/// [`BackendResponse`] so callers see the backend's answer unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The HTTP request never produced a response (connect, timeout, I/O).
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The outbound task was torn down before the call completed.
    #[error("outbound call aborted: {0}")]
    Aborted(String),

    /// The request body could not be serialized.
    #[error("request encoding failed: {0}")]
    Encode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// An outbound call, independent of the HTTP client that will carry it.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Set a JSON body and the matching `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, RelayError> {
        let bytes = serde_json::to_vec(body).map_err(|e| RelayError::Encode(e.to_string()))?;
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }
}

/// A fully-buffered backend response.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl BackendResponse {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Canonical reason phrase for the status, e.g. `"Unauthorized"`.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Status")
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Anything that can carry an [`OutboundRequest`] to a server.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<BackendResponse, RelayError>;
}
