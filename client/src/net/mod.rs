//! Networking for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ask` performs the single `POST /ask` round trip and normalizes failures;
//! `types` defines the JSON wire schema shared with the server.

pub mod ask;
pub mod types;
