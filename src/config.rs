//! Gateway configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Built exactly once in `main` and shared behind an `Arc`. Nothing mutates
//! it afterwards; the gate and relay only ever borrow it.

use reqwest::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "meucci_presenze_id";
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing backend URL: set API_URL or PUBLIC_API_URL")]
    MissingBackendUrl,
    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidBackendUrl { url: String, reason: String },
    #[error("invalid backend endpoint {path:?}: {reason}")]
    InvalidEndpoint { path: String, reason: String },
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub backend_url: Url,
    /// Name of the cookie whose presence marks a client as logged in.
    pub session_cookie_name: String,
    pub port: u16,
    pub timeouts: BackendTimeouts,
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Required:
    /// - `API_URL`, falling back to `PUBLIC_API_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SESSION_COOKIE_NAME`: default `meucci_presenze_id`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is missing or malformed, or if
    /// `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("API_URL")
            .or_else(|_| std::env::var("PUBLIC_API_URL"))
            .map_err(|_| ConfigError::MissingBackendUrl)?;
        let backend_url = parse_backend_url(&raw_url)?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let session_cookie_name = std::env::var("SESSION_COOKIE_NAME")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_owned());

        let timeouts = BackendTimeouts {
            request_secs: env_parse_u64("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { backend_url, session_cookie_name, port, timeouts })
    }

    /// Config pointing at `backend_url` with every other field defaulted.
    ///
    /// # Errors
    ///
    /// Returns an error if `backend_url` is not an absolute http(s) URL.
    #[cfg(test)]
    pub fn with_backend(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_owned(),
            port: DEFAULT_PORT,
            timeouts: BackendTimeouts {
                request_secs: DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
            },
        })
    }

    /// Resolve an endpoint path (e.g. `/login`) against the backend base URL.
    ///
    /// The base path is kept, so a backend mounted at `https://host/api`
    /// resolves `/login` to `https://host/api/login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is not valid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let base = self.backend_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| ConfigError::InvalidEndpoint { path: path.to_owned(), reason: e.to_string() })
    }
}

fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBackendUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidBackendUrl {
            url: raw.to_owned(),
            reason: "expected an absolute http(s) URL".into(),
        });
    }
    Ok(url)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
