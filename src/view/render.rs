//! Response rendering: JSON documents and the auto-refreshing HTML page.

use askama::Template;
use strum::Display;
use time::OffsetDateTime;

use crate::cluster::{Member, MemberStatus, ServiceGroups};
use crate::error::RenderError;

use super::humanize::time_ago;
use super::model::ViewModel;

/// Content type of structured responses.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Content type of the display page.
pub const HTML_CONTENT_TYPE: &str = "text/html";
/// Meta-refresh interval of the display page, in seconds.
pub const REFRESH_SECONDS: u32 = 4;

/// Output format selected by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RenderFormat {
    /// Service groups as an indented JSON document.
    Json,
    /// Members and services as an HTML page.
    Html,
}

impl RenderFormat {
    /// `.json` selects JSON; every other suffix, including none, selects HTML.
    pub fn from_extension(extension: &str) -> Self {
        if extension == ".json" {
            RenderFormat::Json
        } else {
            RenderFormat::Html
        }
    }

    /// Content type header value for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            RenderFormat::Json => JSON_CONTENT_TYPE,
            RenderFormat::Html => HTML_CONTENT_TYPE,
        }
    }
}

/// Label for a numeric member status code.
pub fn status_str(code: i64) -> &'static str {
    match code {
        0 => "Alive",
        1 => "Tombstone",
        _ => "",
    }
}

/// The display page. Template source lives in `templates/services.html`.
#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesPage<'a> {
    /// Members in display order.
    pub members: &'a [Member],
    /// Registrations grouped by service name.
    pub services: &'a ServiceGroups,
    /// Reference instant for `time_ago`.
    pub rendered_at: OffsetDateTime,
    /// Meta-refresh interval.
    pub refresh_seconds: u32,
}

impl<'a> ServicesPage<'a> {
    /// Bind a view model to the page template.
    pub fn new(view: &'a ViewModel) -> Self {
        Self {
            members: &view.members,
            services: &view.services,
            rendered_at: view.rendered_at,
            refresh_seconds: REFRESH_SECONDS,
        }
    }

    /// Template helper: status label for a member.
    pub fn status_str(&self, status: &MemberStatus) -> &'static str {
        status_str(status.code())
    }

    /// Template helper: registry field value, with strings shown unquoted.
    pub fn field_str(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Template helper: age of `when` relative to the page's render time.
    pub fn time_ago(&self, when: &OffsetDateTime) -> String {
        time_ago(*when, self.rendered_at)
    }
}

/// Serialize the service groups as two-space indented JSON.
pub fn render_json(view: &ViewModel) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&view.services)?)
}

/// Render the HTML display page.
pub fn render_page(view: &ViewModel) -> Result<String, RenderError> {
    Ok(ServicesPage::new(view).render()?)
}

/// Render a view in the requested format.
pub fn render(view: &ViewModel, format: RenderFormat) -> Result<String, RenderError> {
    match format {
        RenderFormat::Json => render_json(view),
        RenderFormat::Html => render_page(view),
    }
}
