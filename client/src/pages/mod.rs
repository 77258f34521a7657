//! Route-level page components.

pub mod chat;
