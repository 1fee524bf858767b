//! Cookie relay interceptor.
//!
//! Wraps an inner [`Transport`] for the lifetime of one inbound request.
//! Calls to the configured backend origin get the browser's `Cookie` header
//! verbatim, and every `Set-Cookie` in the backend's answer is translated and
//! queued on the request context. Calls to any other origin pass through
//! untouched so the session cookie never leaks to third parties.

use std::sync::Arc;

use axum::http::header;
use reqwest::Url;

use super::{BackendResponse, OutboundRequest, RelayError, Transport};
use crate::config::GatewayConfig;
use crate::context::RequestContext;
use crate::cookies;

pub struct CookieRelay {
    inner: Arc<dyn Transport>,
    config: Arc<GatewayConfig>,
    context: RequestContext,
}

impl CookieRelay {
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, config: Arc<GatewayConfig>, context: RequestContext) -> Self {
        Self { inner, config, context }
    }

    /// True when `url` shares scheme, host, and port with the backend.
    #[must_use]
    pub fn targets_backend(&self, url: &Url) -> bool {
        url.origin() == self.config.backend_url.origin()
    }

    fn capture_cookies(&self, response: &BackendResponse) {
        for raw in response.headers.get_all(header::SET_COOKIE) {
            match cookies::parse_directive(raw) {
                Ok(backend_cookie) => {
                    tracing::debug!(
                        request_id = %self.context.id,
                        login_status = self.context.login_status.as_str(),
                        cookie = backend_cookie.name(),
                        "relaying backend cookie"
                    );
                    self.context.pending.queue(cookies::translate(&backend_cookie));
                }
                Err(e) => {
                    tracing::warn!(request_id = %self.context.id, error = %e, "dropping backend cookie directive");
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl Transport for CookieRelay {
    async fn send(&self, mut request: OutboundRequest) -> Result<BackendResponse, RelayError> {
        if !self.targets_backend(&request.url) {
            tracing::debug!(request_id = %self.context.id, url = %request.url, "outbound call skips cookie relay");
            return self.inner.send(request).await;
        }

        request.headers.remove(header::COOKIE);
        if let Some(cookie) = &self.context.inbound_cookie {
            request.headers.insert(header::COOKIE, cookie.clone());
        }

        // Spawned so a client disconnect (which drops this future) does not
        // cancel the backend call mid-flight.
        let inner = Arc::clone(&self.inner);
        let response = tokio::spawn(async move { inner.send(request).await })
            .await
            .map_err(|e| RelayError::Aborted(e.to_string()))??;

        if response.headers.contains_key(header::SET_COOKIE) {
            self.capture_cookies(&response);
        }

        Ok(response)
    }
}

#[cfg(test)]
#[path = "cookie_relay_test.rs"]
mod tests;
