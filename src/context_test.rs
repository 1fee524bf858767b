use super::*;

#[test]
fn login_status_labels() {
    assert_eq!(LoginStatus::LoggedIn.as_str(), "logged_in");
    assert_eq!(LoginStatus::LoggedOut.as_str(), "logged_out");
}

// =============================================================================
// PendingCookies
// =============================================================================

#[test]
fn pending_cookies_starts_empty() {
    let pending = PendingCookies::new();
    assert!(pending.is_empty());
    assert!(pending.drain().is_empty());
}

#[test]
fn pending_cookies_last_write_per_name_wins() {
    let pending = PendingCookies::new();
    pending.queue(Cookie::new("session", "first"));
    pending.queue(Cookie::new("theme", "dark"));
    pending.queue(Cookie::new("session", "second"));

    let drained = pending.drain();
    let pairs: Vec<(&str, &str)> = drained.iter().map(|c| (c.name(), c.value())).collect();
    assert_eq!(pairs, vec![("theme", "dark"), ("session", "second")]);
}

#[test]
fn pending_cookies_drain_empties_queue() {
    let pending = PendingCookies::new();
    pending.queue(Cookie::new("a", "1"));
    assert_eq!(pending.len(), 1);
    let _ = pending.drain();
    assert!(pending.is_empty());
}

#[test]
fn pending_cookies_clones_share_queue() {
    let pending = PendingCookies::new();
    let handle = pending.clone();
    handle.queue(Cookie::new("a", "1"));
    assert_eq!(pending.len(), 1);
}

// =============================================================================
// inbound_cookie_header
// =============================================================================

#[test]
fn inbound_cookie_header_absent() {
    assert!(inbound_cookie_header(&HeaderMap::new()).is_none());
}

#[test]
fn inbound_cookie_header_single_is_verbatim() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("meucci_presenze_id=abc;theme=dark"));
    let value = inbound_cookie_header(&headers).unwrap();
    assert_eq!(value.as_bytes(), b"meucci_presenze_id=abc;theme=dark");
}

#[test]
fn inbound_cookie_header_joins_split_headers() {
    let mut headers = HeaderMap::new();
    headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
    let value = inbound_cookie_header(&headers).unwrap();
    assert_eq!(value.as_bytes(), b"a=1; b=2");
}

#[test]
fn request_context_ids_are_unique() {
    let a = RequestContext::new(LoginStatus::LoggedOut, "/", None);
    let b = RequestContext::new(LoginStatus::LoggedOut, "/", None);
    assert_ne!(a.id, b.id);
    assert_eq!(a.path, "/");
}
