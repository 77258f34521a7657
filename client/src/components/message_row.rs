//! One transcript row: avatar plus bubble, ordered by sender.

use leptos::prelude::*;

use crate::state::chat::ChatMessage;
use crate::util::markup::{
    RowPart, avatar_class, avatar_icon_class, bubble_class, bubble_html, container_class, row_layout,
};

/// Render a single message. Bubble text is set as escaped inner HTML so
/// newlines show as line breaks.
#[component]
pub fn MessageRow(message: ChatMessage) -> impl IntoView {
    let sender = message.sender;
    let html = bubble_html(&message.text);
    let bubble_cls = bubble_class(sender, message.is_error);

    let render = |part: RowPart| match part {
        RowPart::Avatar => view! {
            <div class=avatar_class(sender)>
                <i class=avatar_icon_class(sender)></i>
            </div>
        }
        .into_any(),
        RowPart::Bubble => view! { <div class=bubble_cls.clone() inner_html=html.clone()></div> }.into_any(),
    };
    let [first, second] = row_layout(sender).map(render);

    view! {
        <div class=container_class(sender)>
            {first}
            {second}
        </div>
    }
}
