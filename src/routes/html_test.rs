use super::*;

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}

#[test]
fn login_page_escapes_username_and_message() {
    let page = login_page(Some("<bad>"), "\"ada\"");
    assert!(page.contains("&lt;bad&gt;"));
    assert!(page.contains("value=\"&quot;ada&quot;\""));
}

#[test]
fn login_page_without_message_has_no_alert() {
    assert!(!login_page(None, "").contains("role=\"alert\""));
}

#[test]
fn teachers_page_empty_state() {
    assert!(teachers_page(&[]).contains("No teachers have lessons today."));
}

#[test]
fn error_page_shows_status_and_reason() {
    let page = error_page(403, "Forbidden");
    assert!(page.contains("<h1>403</h1>"));
    assert!(page.contains("<title>Forbidden</title>"));
}
