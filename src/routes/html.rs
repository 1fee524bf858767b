//! HTML rendering for the gateway's pages.

use std::fmt::Write;

use crate::api::{Absence, CanBeAbsentTeacher};

/// Escape text for use in element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap `body` in the shared document shell. `body` must already be escaped.
#[must_use]
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title></head><body>{body}</body></html>",
        escape(title)
    )
}

/// Login form, optionally showing a message above it.
#[must_use]
pub fn login_page(message: Option<&str>, username: &str) -> String {
    let mut body = String::from("<main><h1>Sign in</h1>");
    if let Some(message) = message {
        let _ = write!(body, "<p role=\"alert\">{}</p>", escape(message));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/auth/login\">\
         <label>Username <input name=\"username\" autocomplete=\"username\" value=\"{}\"></label>\
         <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\
         <button type=\"submit\">Sign in</button></form></main>",
        escape(username)
    );
    document("Sign in", &body)
}

#[must_use]
pub fn teachers_page(teachers: &[CanBeAbsentTeacher]) -> String {
    let mut body = String::from("<main><h1>Teachers who can be absent today</h1>");
    if teachers.is_empty() {
        body.push_str("<p>No teachers have lessons today.</p>");
    } else {
        body.push_str("<ul>");
        for teacher in teachers {
            let _ = write!(body, "<li data-id=\"{}\">{}</li>", teacher.id, escape(&teacher.full_name));
        }
        body.push_str("</ul>");
    }
    body.push_str("<p><a href=\"/\">Absences</a> · <a href=\"/auth/logout\">Sign out</a></p></main>");
    document("Home", &body)
}

#[must_use]
pub fn absences_page(absences: &[Absence]) -> String {
    let mut body = String::from("<main><h1>Absences</h1>");
    if absences.is_empty() {
        body.push_str("<p>No absences recorded.</p>");
    }
    for absence in absences {
        let _ = write!(body, "<section><h2>{}</h2><table>", escape(&absence.absent_professor));
        body.push_str("<tr><th>Time</th><th>Room</th><th>Class</th><th>Substitute</th><th>Status</th></tr>");
        for class in &absence.classes {
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&class.time),
                escape(class.room.as_deref().unwrap_or("-")),
                escape(class.group.as_deref().unwrap_or("-")),
                escape(class.substitute_professor.as_deref().unwrap_or("-")),
                class.absent_status.label()
            );
        }
        body.push_str("</table></section>");
    }
    body.push_str("<p><a href=\"/home\">Home</a> · <a href=\"/auth/logout\">Sign out</a></p></main>");
    document("Absences", &body)
}

#[must_use]
pub fn error_page(status: u16, reason: &str) -> String {
    document(reason, &format!("<main><h1>{status}</h1><p>{}</p></main>", escape(reason)))
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
