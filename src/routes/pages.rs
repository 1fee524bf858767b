//! Protected pages backed by backend data.

use axum::response::Html;

use super::{Backend, PageError, html, require_data};

/// `GET /home` — teachers with lessons today.
pub async fn home(Backend(api): Backend) -> Result<Html<String>, PageError> {
    let teachers = require_data(api.teachers_can_be_absent().await?)?;
    Ok(Html(html::teachers_page(&teachers)))
}

/// `GET /` — recorded absences.
pub async fn index(Backend(api): Backend) -> Result<Html<String>, PageError> {
    let absences = require_data(api.absences().await?)?;
    Ok(Html(html::absences_page(&absences)))
}
