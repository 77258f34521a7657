//! Message markup: text escaping and bubble layout.
//!
//! Only `<` and `>` are escaped. That is the whole sanitization policy for
//! bubble text; `&` and quotes pass through untouched.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use crate::state::chat::Sender;

/// One half of a rendered message row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowPart {
    Avatar,
    Bubble,
}

/// Escape angle brackets so message text cannot inject elements.
pub fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Inner HTML for a bubble: escaped text with newlines turned into `<br>`.
pub fn bubble_html(text: &str) -> String {
    escape_angle_brackets(text).replace('\n', "<br>")
}

/// Left-to-right order of a row's parts. User rows put the avatar on the
/// right, bot rows on the left.
pub fn row_layout(sender: Sender) -> [RowPart; 2] {
    match sender {
        Sender::User => [RowPart::Bubble, RowPart::Avatar],
        Sender::Bot => [RowPart::Avatar, RowPart::Bubble],
    }
}

fn sender_key(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    }
}

pub fn container_class(sender: Sender) -> String {
    format!("message-container {}", sender_key(sender))
}

pub fn avatar_class(sender: Sender) -> String {
    format!("avatar {}-avatar", sender_key(sender))
}

pub fn avatar_icon_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "fas fa-user",
        Sender::Bot => "fas fa-robot",
    }
}

pub fn bubble_class(sender: Sender, is_error: bool) -> String {
    let mut class = format!("message {}-message", sender_key(sender));
    if is_error {
        class.push_str(" error-message");
    }
    class
}
