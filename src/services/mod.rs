//! Domain services invoked by HTTP handlers.

pub mod ask;
