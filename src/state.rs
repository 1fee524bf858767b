//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the access gate via the
//! `State` extractor. It holds only read-only values: the gateway config and
//! the base transport to the backend. Per-request state lives in
//! [`RequestContext`], never here.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::GatewayConfig;
use crate::context::RequestContext;
use crate::relay::{CookieRelay, Transport};

/// Clone is required by Axum; both fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// Base transport; every use goes through a per-request [`CookieRelay`].
    pub transport: Arc<dyn Transport>,
}

impl AppState {
    #[must_use]
    pub fn new(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config: Arc::new(config), transport }
    }

    /// Backend API client whose calls are relayed on behalf of `context`.
    #[must_use]
    pub fn api_for(&self, context: RequestContext) -> ApiClient {
        let relay = CookieRelay::new(Arc::clone(&self.transport), Arc::clone(&self.config), context);
        ApiClient::new(Arc::new(relay), Arc::clone(&self.config))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
