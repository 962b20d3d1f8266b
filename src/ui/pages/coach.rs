//! AI Coach chat page.

use std::fmt::Write as _;

use crate::session::{ChatMessage, ChatRole};
use crate::shell::{ActionError, View};
use crate::ui::components::{BUSY_ON_SUBMIT, ErrorWording, error_alert, escape, submit_button};
use crate::ui::layout::page;

pub const WORDING: ErrorWording = ErrorWording {
    rejected: "Error",
    transport: "Failed to connect to backend",
    status: "Error",
    status_body: true,
};

/// Render the transcript, an optional failure from the last send, and the
/// input box.
#[must_use]
pub fn render(transcript: &[ChatMessage], error: Option<&ActionError>) -> String {
    let mut messages = String::new();
    for message in transcript {
        let (class, label) = match message.role {
            ChatRole::User => ("chat-message user", "You"),
            ChatRole::Assistant => ("chat-message assistant", "Coach"),
        };
        let _ = write!(
            messages,
            r#"<div class="{class}"><span class="chat-role">{label}</span><div class="chat-content">{}</div></div>"#,
            escape(&message.content)
        );
    }
    let error = error.map(|e| error_alert(WORDING, e)).unwrap_or_default();

    let content = format!(
        r#"<h2>AI Health Coach</h2>
<p class="caption">Ask me anything about fitness, nutrition, or health!</p>
<section class="chat-log" aria-live="polite" aria-label="Chat messages">
    {messages}
    {error}
</section>
<form class="chat-input" method="post" action="{action}" {BUSY_ON_SUBMIT}>
    <input type="text" name="message" placeholder="How can I help you today?" autocomplete="off" required>
    {button}
</form>"#,
        action = View::Coach.path(),
        button = submit_button("Send", "Thinking..."),
    );
    page(Some(View::Coach), &content)
}
