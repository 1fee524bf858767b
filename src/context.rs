//! Per-request context shared by the access gate, page handlers, and the relay.
//!
//! DESIGN
//! ======
//! The gate creates one `RequestContext` per inbound request and inserts it
//! into the request extensions. Handlers clone it (all fields are cheap or
//! `Arc`-wrapped) and hand it to the cookie relay. Cookie writes the relay
//! queues here are flushed onto the outer response by the gate, so they land
//! on the client-facing response and never on the backend response the
//! handler sees. The context is dropped with the request.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, HeaderValue, header};
use axum_extra::extract::cookie::Cookie;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    LoggedIn,
    LoggedOut,
}

impl LoginStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoggedIn => "logged_in",
            Self::LoggedOut => "logged_out",
        }
    }
}

// =============================================================================
// PENDING COOKIES
// =============================================================================

/// Cookie writes queued for the client-facing response.
///
/// Keyed by cookie name: a later write for the same name replaces the earlier
/// one, and survivors keep the order they were queued in.
#[derive(Debug, Clone, Default)]
pub struct PendingCookies {
    inner: Arc<Mutex<Vec<Cookie<'static>>>>,
}

impl PendingCookies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, cookie: Cookie<'static>) {
        let mut pending = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pending.retain(|existing| existing.name() != cookie.name());
        pending.push(cookie);
    }

    /// Take every queued write, leaving the queue empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Cookie<'static>> {
        let mut pending = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// REQUEST CONTEXT
// =============================================================================

#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlates log lines for one inbound request.
    pub id: Uuid,
    pub login_status: LoginStatus,
    pub path: String,
    /// Raw inbound `Cookie` header, exactly as the browser sent it.
    pub inbound_cookie: Option<HeaderValue>,
    pub pending: PendingCookies,
}

impl RequestContext {
    #[must_use]
    pub fn new(login_status: LoginStatus, path: impl Into<String>, inbound_cookie: Option<HeaderValue>) -> Self {
        Self { id: Uuid::new_v4(), login_status, path: path.into(), inbound_cookie, pending: PendingCookies::new() }
    }
}

/// The inbound `Cookie` header as raw bytes.
///
/// HTTP/2 clients may split cookies across several `Cookie` headers; those are
/// joined with `"; "` as RFC 9113 prescribes. A single header is returned
/// untouched.
#[must_use]
pub fn inbound_cookie_header(headers: &HeaderMap) -> Option<HeaderValue> {
    let mut values = headers.get_all(header::COOKIE).iter();
    let first = values.next()?;
    let rest: Vec<&HeaderValue> = values.collect();
    if rest.is_empty() {
        return Some(first.clone());
    }

    let mut joined = first.as_bytes().to_vec();
    for value in rest {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(value.as_bytes());
    }
    HeaderValue::from_bytes(&joined).ok()
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
