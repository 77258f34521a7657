//! Rendering and browser helpers used by components.

pub mod dom;
pub mod markup;
