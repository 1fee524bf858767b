//! Cookie translation — backend `Set-Cookie` directives into client cookie writes.
//!
//! DESIGN
//! ======
//! The backend owns session semantics; the gateway only normalizes the
//! attributes it forwards. Name and value are copied byte-for-byte and never
//! decoded. Path, `SameSite`, `HttpOnly` and `Secure` are always forced so the
//! cookie is visible to the access gate on every route.
//!
//! MAX-AGE POLICY
//! ==============
//! - `Max-Age` > 0 from the backend is kept as-is.
//! - `Max-Age` <= 0 is an explicit clear and becomes `Max-Age=0`.
//! - No `Max-Age` but an `Expires` date: the remaining lifetime, floored at 0.
//! - Neither: the 400-day browser ceiling.

use axum::http::HeaderValue;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Cookie lifetime ceiling in seconds (400 days), used when the backend sets none.
pub const COOKIE_ABSOLUTE_MAX_AGE_SECS: i64 = 34_560_000;

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Set-Cookie directive is not valid UTF-8")]
    NotUtf8,
    #[error("malformed Set-Cookie directive: {0}")]
    Parse(String),
}

/// Parse one raw backend `Set-Cookie` header value.
///
/// # Errors
///
/// Returns an error if the header is not UTF-8 or is not a valid cookie.
pub fn parse_directive(raw: &HeaderValue) -> Result<Cookie<'static>, CookieError> {
    let text = raw.to_str().map_err(|_| CookieError::NotUtf8)?;
    Cookie::parse(text.to_owned()).map_err(|e| CookieError::Parse(e.to_string()))
}

/// Translate a parsed backend cookie into the cookie written to the client.
#[must_use]
pub fn translate(backend: &Cookie<'_>) -> Cookie<'static> {
    translate_at(backend, OffsetDateTime::now_utc())
}

/// [`translate`] with an explicit clock, for `Expires`-only directives.
#[must_use]
pub fn translate_at(backend: &Cookie<'_>, now: OffsetDateTime) -> Cookie<'static> {
    let mut builder = Cookie::build((backend.name().to_owned(), backend.value().to_owned()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(client_max_age(backend, now))
        .http_only(true)
        .secure(true);

    if let Some(domain) = backend.domain() {
        builder = builder.domain(domain.to_owned());
    }

    builder.build()
}

/// Lifetime the client cookie gets, per the policy in the module docs.
#[must_use]
pub fn client_max_age(backend: &Cookie<'_>, now: OffsetDateTime) -> Duration {
    if let Some(max_age) = backend.max_age() {
        return if max_age.is_positive() { max_age } else { Duration::ZERO };
    }

    match backend.expires_datetime() {
        Some(expires) => {
            let remaining = expires - now;
            if remaining.is_positive() { Duration::seconds(remaining.whole_seconds()) } else { Duration::ZERO }
        }
        None => Duration::seconds(COOKIE_ABSOLUTE_MAX_AGE_SECS),
    }
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;
