use super::*;

// =============================================================
// escaping
// =============================================================

#[test]
fn escape_replaces_angle_brackets_only() {
    assert_eq!(
        escape_angle_brackets(r#"<script>alert("a & b")</script>"#),
        r#"&lt;script&gt;alert("a & b")&lt;/script&gt;"#
    );
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape_angle_brackets("ciao, mondo"), "ciao, mondo");
}

#[test]
fn bubble_html_converts_newlines_after_escaping() {
    assert_eq!(bubble_html("riga 1\nriga <2>\n"), "riga 1<br>riga &lt;2&gt;<br>");
}

#[test]
fn bubble_html_keeps_injected_br_inert() {
    assert_eq!(bubble_html("a<br>b"), "a&lt;br&gt;b");
}

// =============================================================
// layout and classes
// =============================================================

#[test]
fn user_rows_put_avatar_last() {
    assert_eq!(row_layout(Sender::User), [RowPart::Bubble, RowPart::Avatar]);
}

#[test]
fn bot_rows_put_avatar_first() {
    assert_eq!(row_layout(Sender::Bot), [RowPart::Avatar, RowPart::Bubble]);
}

#[test]
fn classes_follow_sender() {
    assert_eq!(container_class(Sender::User), "message-container user");
    assert_eq!(avatar_class(Sender::Bot), "avatar bot-avatar");
    assert_eq!(avatar_icon_class(Sender::User), "fas fa-user");
    assert_eq!(avatar_icon_class(Sender::Bot), "fas fa-robot");
}

#[test]
fn bubble_class_marks_errors() {
    assert_eq!(bubble_class(Sender::User, false), "message user-message");
    assert_eq!(bubble_class(Sender::Bot, true), "message bot-message error-message");
}
