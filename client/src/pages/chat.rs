//! Assistant page hosting the chat widget.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;

#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <main class="chat-page">
            <header class="chat-page__header">
                <i class="fas fa-robot"></i>
                <h1>"pnAI002"</h1>
            </header>
            <ChatPanel/>
        </main>
    }
}
