//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat widget while reading/writing the shared
//! `ChatState` from the Leptos context provided by `App`.

pub mod chat_panel;
pub mod message_row;
pub mod typing_indicator;
