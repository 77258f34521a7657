//! Animated dots shown while the assistant is answering.

use leptos::prelude::*;

#[component]
pub fn TypingIndicator(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    view! {
        <div id="typing-indicator" class="typing-indicator" class:typing=move || visible.get() aria-hidden=move || (!visible.get()).to_string()>
            <span></span>
            <span></span>
            <span></span>
        </div>
    }
}
