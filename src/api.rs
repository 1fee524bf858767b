//! Typed client for the backend API.
//!
//! Page handlers call the backend only through this client, and the client
//! only talks through the transport it is given. `AppState::api_for` hands
//! it a per-request [`CookieRelay`](crate::relay::CookieRelay), so every call
//! made here is relayed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GatewayConfig};
use crate::relay::{BackendResponse, OutboundRequest, RelayError, Transport};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error(transparent)]
    Endpoint(#[from] ConfigError),
}

/// Login form payload for `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Entry of `GET /teachers/can_be_absent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanBeAbsentTeacher {
    pub id: i32,
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceStatus {
    Uncovered,
    ClassDelayed,
    ClassCancelled,
    SubstituteFound,
}

impl AbsenceStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Uncovered => "Uncovered",
            Self::ClassDelayed => "Class delayed",
            Self::ClassCancelled => "Class cancelled",
            Self::SubstituteFound => "Substitute found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsentClass {
    pub id: i32,
    pub substitute_professor: Option<String>,
    /// Lesson start, `HH:MM:SS`.
    pub time: String,
    pub room: Option<String>,
    pub group: Option<String>,
    pub absent_status: AbsenceStatus,
}

/// Entry of `GET /absence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub absent_professor: String,
    pub classes: Vec<AbsentClass>,
}

/// A backend answer plus its decoded body.
///
/// `data` is `None` when the status is not 2xx or the body does not decode.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub data: Option<T>,
    pub response: BackendResponse,
}

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: Arc<GatewayConfig>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: Arc<GatewayConfig>) -> Self {
        Self { transport, config }
    }

    /// `POST /login`. The session cookie comes back as a `Set-Cookie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call never reached the backend.
    pub async fn login(&self, credentials: &Credentials) -> Result<BackendResponse, ApiError> {
        let request = OutboundRequest::post(self.config.endpoint("/login")?).json(credentials)?;
        Ok(self.transport.send(request).await?)
    }

    /// `GET /logout`. The backend answers with a clearing `Set-Cookie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call never reached the backend.
    pub async fn logout(&self) -> Result<BackendResponse, ApiError> {
        let request = OutboundRequest::get(self.config.endpoint("/logout")?);
        Ok(self.transport.send(request).await?)
    }

    /// `GET /teachers/can_be_absent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call never reached the backend.
    pub async fn teachers_can_be_absent(&self) -> Result<ApiReply<Vec<CanBeAbsentTeacher>>, ApiError> {
        self.get_json("/teachers/can_be_absent").await
    }

    /// `GET /absence`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call never reached the backend.
    pub async fn absences(&self) -> Result<ApiReply<Vec<Absence>>, ApiError> {
        self.get_json("/absence").await
    }

    async fn get_json<T>(&self, path: &str) -> Result<ApiReply<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = OutboundRequest::get(self.config.endpoint(path)?);
        let response = self.transport.send(request).await?;

        let data = if response.is_success() {
            match response.json::<T>() {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(%path, error = %e, "backend body did not decode");
                    None
                }
            }
        } else {
            None
        };

        Ok(ApiReply { data, response })
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
