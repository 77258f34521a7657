//! Client-side state for the chat widget.
//!
//! DESIGN
//! ======
//! State is a plain struct wrapped in an `RwSignal` by the root component, so
//! every transition is testable without a browser.

pub mod chat;
