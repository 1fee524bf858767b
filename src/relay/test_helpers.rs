//! Substitute transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};

use super::{BackendResponse, OutboundRequest, RelayError, Transport};

/// Records every request it receives and answers from a canned queue.
///
/// When the queue runs dry it answers `200 OK` with an empty body.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<BackendResponse, RelayError>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new(responses: Vec<Result<BackendResponse, RelayError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) }
    }

    #[must_use]
    pub fn ok() -> Self {
        Self::new(Vec::new())
    }

    /// Snapshot of the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<BackendResponse, RelayError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(empty_response(StatusCode::OK)))
    }
}

/// Backend response with the given status, no headers, and no body.
#[must_use]
pub fn empty_response(status: StatusCode) -> BackendResponse {
    BackendResponse::new(status, HeaderMap::new(), Bytes::new())
}

/// Backend response with the given status and `Set-Cookie` directives.
#[must_use]
pub fn response_with_cookies(status: StatusCode, set_cookies: &[&'static str]) -> BackendResponse {
    let mut response = empty_response(status);
    for raw in set_cookies {
        response
            .headers
            .append(header::SET_COOKIE, HeaderValue::from_static(raw));
    }
    response
}

/// Backend response with a JSON body.
#[must_use]
pub fn json_response(status: StatusCode, body: &serde_json::Value) -> BackendResponse {
    let mut response = empty_response(status);
    response
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.body = serde_json::to_vec(body).unwrap().into();
    response
}
