//! # client
//!
//! Leptos + WASM chat widget for the pnAI002 assistant.
//!
//! The widget renders a transcript of user and bot messages, posts each
//! question to `POST /ask`, and shows the reply or a normalized error.
//! Rendered on the server (`ssr`) and hydrated in the browser (`hydrate`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
