use super::*;

fn filtered(values: &[&'static str]) -> Vec<String> {
    let mut headers = HeaderMap::new();
    for v in values {
        headers.append(header::LINK, HeaderValue::from_static(v));
    }
    filter_preload_hints(&mut headers);
    headers
        .get_all(header::LINK)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

#[test]
fn classify_maps_as_attribute() {
    assert_eq!(PreloadKind::classify(false, Some("font")), Some(PreloadKind::Font));
    assert_eq!(PreloadKind::classify(false, Some("script")), Some(PreloadKind::Script));
    assert_eq!(PreloadKind::classify(false, Some("STYLE")), Some(PreloadKind::Stylesheet));
    assert_eq!(PreloadKind::classify(false, Some("image")), Some(PreloadKind::Asset));
    assert_eq!(PreloadKind::classify(false, Some("document")), None);
    assert_eq!(PreloadKind::classify(false, None), None);
}

#[test]
fn classify_modulepreload_is_script() {
    assert_eq!(PreloadKind::classify(true, None), Some(PreloadKind::Script));
}

#[test]
fn accepted_hints_survive() {
    let out = filtered(&["</app.js>; rel=preload; as=script, </inter.woff2>; rel=preload; as=font; crossorigin"]);
    assert_eq!(out, vec!["</app.js>; rel=preload; as=script, </inter.woff2>; rel=preload; as=font; crossorigin"]);
}

#[test]
fn rejected_hints_are_stripped() {
    let out = filtered(&["</app.css>; rel=preload; as=style, </frame.html>; rel=preload; as=document"]);
    assert_eq!(out, vec!["</app.css>; rel=preload; as=style"]);
}

#[test]
fn preload_without_as_is_stripped() {
    assert!(filtered(&["</mystery>; rel=preload"]).is_empty());
}

#[test]
fn non_preload_links_are_untouched() {
    let out = filtered(&["<https://example.test/next>; rel=\"next\"", "</w.js>; rel=preload; as=worker"]);
    assert_eq!(out, vec!["<https://example.test/next>; rel=\"next\""]);
}

#[test]
fn quoted_rel_lists_are_understood() {
    let out = filtered(&["</m.js>; rel=\"modulepreload\"", "</x>; rel=\"prefetch preload\"; as=\"embed\""]);
    assert_eq!(out, vec!["</m.js>; rel=\"modulepreload\""]);
}

#[test]
fn commas_inside_targets_do_not_split() {
    let out = filtered(&["</a,b.js>; rel=preload; as=script"]);
    assert_eq!(out, vec!["</a,b.js>; rel=preload; as=script"]);
}

#[test]
fn no_link_header_is_noop() {
    let mut headers = HeaderMap::new();
    filter_preload_hints(&mut headers);
    assert!(headers.is_empty());
}

#[test]
fn commas_inside_quoted_params_do_not_split() {
    let out = filtered(&["</f.html>; rel=preload; as=document; title=\"a, b\", </app.js>; rel=preload; as=script"]);
    assert_eq!(out, vec!["</app.js>; rel=preload; as=script"]);
}

#[test]
fn escaped_quote_keeps_quoted_param_open() {
    let out = filtered(&[r#"</f.html>; rel=preload; as=document; title="say \"hi, there\"", </next>; rel=next"#]);
    assert_eq!(out, vec!["</next>; rel=next"]);
}
