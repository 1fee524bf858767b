//! Preload hint filtering for allowed responses.
//!
//! Responses may advertise resources to fetch early via `Link` headers
//! (`rel=preload` / `rel=modulepreload`). Only fonts, scripts, stylesheets,
//! and generic assets are let through; any other preload hint is stripped.
//! Links that are not preload hints are kept as-is.

use axum::http::{HeaderMap, HeaderValue, header};

/// The preload classes let through. Every other `as` value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    Font,
    Script,
    Stylesheet,
    Asset,
}

impl PreloadKind {
    /// Classify a preload hint from its `rel` and `as` attributes.
    ///
    /// `None` means the hint is not in an accepted class.
    #[must_use]
    pub fn classify(modulepreload: bool, as_attr: Option<&str>) -> Option<Self> {
        if modulepreload {
            return Some(Self::Script);
        }
        match as_attr?.to_ascii_lowercase().as_str() {
            "font" => Some(Self::Font),
            "script" => Some(Self::Script),
            "style" => Some(Self::Stylesheet),
            "image" | "fetch" | "audio" | "video" | "track" => Some(Self::Asset),
            _ => None,
        }
    }
}

/// One `link-value` of a `Link` header, split into target and parameters.
struct LinkValue<'a> {
    raw: &'a str,
    rel: Vec<String>,
    as_attr: Option<&'a str>,
}

impl<'a> LinkValue<'a> {
    fn parse(raw: &'a str) -> Self {
        let mut rel = Vec::new();
        let mut as_attr = None;
        for param in raw.split(';').skip(1) {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match key.trim().to_ascii_lowercase().as_str() {
                "rel" => rel.extend(value.split_ascii_whitespace().map(str::to_ascii_lowercase)),
                "as" => as_attr = Some(value),
                _ => {}
            }
        }
        Self { raw: raw.trim(), rel, as_attr }
    }

    fn is_preload(&self) -> bool {
        self.rel.iter().any(|r| r == "preload" || r == "modulepreload")
    }

    fn preload_kind(&self) -> Option<PreloadKind> {
        let modulepreload = self.rel.iter().any(|r| r == "modulepreload");
        PreloadKind::classify(modulepreload, self.as_attr)
    }

    fn keep(&self) -> bool {
        !self.is_preload() || self.preload_kind().is_some()
    }
}

/// Split a `Link` header on commas that are not inside `<...>` targets or
/// quoted-string parameters (RFC 8288, with `\` escapes).
fn split_links(header: &str) -> Vec<&str> {
    let mut links = Vec::new();
    let mut depth = 0_usize;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, ch) in header.char_indices() {
        if in_quotes {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' if depth == 0 => in_quotes = true,
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                links.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    links.push(&header[start..]);
    links.into_iter().filter(|l| !l.trim().is_empty()).collect()
}

/// Drop preload hints outside the [`PreloadKind`] classes from every `Link`
/// header.
///
/// Headers that cannot be read as text are removed entirely.
pub fn filter_preload_hints(headers: &mut HeaderMap) {
    if !headers.contains_key(header::LINK) {
        return;
    }

    let originals: Vec<HeaderValue> = headers.get_all(header::LINK).iter().cloned().collect();
    headers.remove(header::LINK);

    for original in originals {
        let Ok(text) = original.to_str() else {
            continue;
        };
        let kept: Vec<&str> = split_links(text)
            .into_iter()
            .map(LinkValue::parse)
            .filter(LinkValue::keep)
            .map(|link| link.raw)
            .collect();
        if kept.is_empty() {
            continue;
        }
        if let Ok(value) = HeaderValue::from_str(&kept.join(", ")) {
            headers.append(header::LINK, value);
        }
    }
}

#[cfg(test)]
#[path = "preload_test.rs"]
mod tests;
