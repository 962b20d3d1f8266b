//! Reusable HTML fragments.

use std::fmt::Write as _;

use crate::backend::BackendError;
use crate::shell::ActionError;

/// Escape text for use in HTML content and quoted attributes.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Info => "alert alert-info",
            Self::Warning => "alert alert-warning",
            Self::Error => "alert alert-error",
        }
    }
}

/// A boxed message. `message` is escaped.
#[must_use]
pub fn alert(tone: Tone, message: &str) -> String {
    format!(
        r#"<div class="{}" role="status">{}</div>"#,
        tone.class(),
        escape(message)
    )
}

/// Bullet list of escaped items.
#[must_use]
pub fn bullet_list(items: &[String]) -> String {
    let mut html = String::from("<ul>");
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul>");
    html
}

/// Big-number tile.
#[must_use]
pub fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><span class="metric-label">{}</span><span class="metric-value">{}</span></div>"#,
        escape(label),
        escape(value)
    )
}

/// Submit button with a busy indicator revealed while the request runs.
#[must_use]
pub fn submit_button(label: &str, busy_text: &str) -> String {
    format!(
        r#"<button type="submit" class="btn-primary">{}</button>
<p class="busy" hidden><span class="spinner"></span> {}</p>"#,
        escape(label),
        escape(busy_text)
    )
}

/// Attribute that shows the busy indicator when a form is submitted.
pub const BUSY_ON_SUBMIT: &str =
    r#"onsubmit="this.querySelector('.busy').hidden = false; this.querySelector('button[type=submit]').disabled = true;""#;

/// Wording of failure messages for one feature.
#[derive(Debug, Clone, Copy)]
pub struct ErrorWording {
    /// Prefix for `success: false` and malformed responses.
    pub rejected: &'static str,
    /// Prefix for transport failures.
    pub transport: &'static str,
    /// Prefix for non-2xx statuses.
    pub status: &'static str,
    /// Whether the status message includes the response body.
    pub status_body: bool,
}

/// User-facing text for a failed action.
#[must_use]
pub fn error_text(wording: ErrorWording, err: &ActionError) -> String {
    match err {
        ActionError::Backend(BackendError::Transport(e)) => {
            format!("{}: {e}", wording.transport)
        }
        ActionError::Backend(BackendError::Status { status, body }) => {
            if wording.status_body && !body.is_empty() {
                format!("{}: {status} - {body}", wording.status)
            } else {
                format!("{}: {status}", wording.status)
            }
        }
        ActionError::Backend(
            e @ (BackendError::Rejected { .. }
            | BackendError::MalformedResponse(_)
            | BackendError::InvalidRequest(_)
            | BackendError::InvalidUrl(_)),
        ) => {
            format!("{}: {e}", wording.rejected)
        }
        ActionError::Profile(e) => e.to_string(),
        ActionError::Upload(e) => e.to_string(),
    }
}

/// Error alert for a failed action.
#[must_use]
pub fn error_alert(wording: ErrorWording, err: &ActionError) -> String {
    alert(Tone::Error, &error_text(wording, err))
}
