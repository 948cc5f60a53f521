//! Transcript to HTML chat bubbles.
//!
//! User messages sit on the right in green, assistant replies on the left in
//! grey. Message text is HTML-escaped and newlines become `<br>`.

use chrono::Local;
use minijinja::HtmlEscape;

use salescall_types::chat::{Message, Role, Transcript};

const USER_BUBBLE: &str = "text-align:right; background:#dcf8c6; padding:10px; \
    border-radius:15px 15px 0px 15px; margin:5px; display:inline-block; max-width:80%;";
const ASSISTANT_BUBBLE: &str = "text-align:left; background:#f0f2f6; padding:10px; \
    border-radius:15px 15px 15px 0px; margin:5px; display:inline-block; max-width:80%;";

/// Render every message as a bubble, in transcript order.
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript.messages().iter().map(render_message).collect()
}

fn render_message(message: &Message) -> String {
    let (class, style) = match message.role() {
        Role::User => ("bubble user", USER_BUBBLE),
        Role::Assistant => ("bubble assistant", ASSISTANT_BUBBLE),
    };
    let time = message.timestamp().with_timezone(&Local).format("%H:%M");

    format!(
        "<div class='{class}' style='{style}'>{}<br><small>{time}</small></div>",
        escape_multiline(message.text())
    )
}

/// Escape `text` and turn every `\n` into `<br>`, trailing ones included.
fn escape_multiline(text: &str) -> String {
    text.split('\n')
        .map(|line| HtmlEscape(line).to_string())
        .collect::<Vec<_>>()
        .join("<br>")
}
