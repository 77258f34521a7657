//! Chat panel: transcript, typing indicator, question form and clear button.

use leptos::prelude::*;

use super::message_row::MessageRow;
use super::typing_indicator::TypingIndicator;
use crate::state::chat::ChatState;
use crate::util::dom;

/// Chat panel showing the transcript and an input for asking questions.
///
/// Submitting a non-blank question disables every control until the single
/// `/ask` request settles; the reply (or error) then lands as one bot message
/// and focus returns to the input.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let input = RwSignal::new(String::new());
    let transcript_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let disabled = Signal::derive(move || chat.with(ChatState::controls_disabled));
    let typing = Signal::derive(move || chat.with(ChatState::is_awaiting));

    // Follow the newest row, and the indicator when it appears.
    Effect::new(move || {
        let _ = chat.with(|c| (c.messages.len(), c.is_awaiting()));
        dom::scroll_to_bottom(transcript_ref);
    });

    // Refocus once a pending request settles.
    Effect::new(move |was_awaiting: Option<bool>| {
        let awaiting = typing.get();
        if was_awaiting == Some(true) && !awaiting {
            dom::focus_input(input_ref);
        }
        awaiting
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = input.get_untracked();
        let Some(question) = chat.try_update(|c| c.submit(&raw)).flatten() else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = crate::net::ask::ask(&question).await;
            if let Err(e) = &outcome {
                log::error!("ask request failed: {e}");
            }
            chat.update(|c| {
                c.settle(outcome);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = question;
        }
    };

    let on_clear = move |_| {
        let cleared = chat.try_update(ChatState::clear).unwrap_or(false);
        if cleared {
            dom::focus_input(input_ref);
            #[cfg(feature = "hydrate")]
            log::info!("chat cleared");
        }
    };

    view! {
        <div class="chat-panel">
            <div id="chatbox" class="chat-panel__messages" node_ref=transcript_ref>
                {move || {
                    chat.get()
                        .messages
                        .into_iter()
                        .map(|message| view! { <MessageRow message=message/> })
                        .collect_view()
                }}
                <TypingIndicator visible=typing/>
            </div>

            <form id="chatForm" class="chat-panel__form" on:submit=on_submit>
                <input
                    id="userInput"
                    class="chat-panel__input"
                    type="text"
                    autocomplete="off"
                    placeholder="Scrivi la tua domanda..."
                    node_ref=input_ref
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    disabled=move || disabled.get()
                />
                <button id="sendButton" class="btn btn--primary chat-panel__send" type="submit" disabled=move || disabled.get()>
                    <i class="fas fa-paper-plane"></i>
                </button>
                <button
                    id="clearChatButton"
                    class="btn chat-panel__clear"
                    type="button"
                    title="Pulisci chat"
                    on:click=on_clear
                    disabled=move || disabled.get()
                >
                    <i class="fas fa-trash"></i>
                </button>
            </form>
        </div>
    }
}
