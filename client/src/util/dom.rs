//! Browser-only DOM helpers for the transcript and input.
//!
//! No-ops outside the `hydrate` build, where there is no DOM to touch.

use leptos::html::{Div, Input};
use leptos::prelude::*;

/// Scrolling waits this long so freshly appended rows have been laid out.
pub const SCROLL_DELAY_MS: u32 = 50;

/// Extra distance past `scroll_height`, keeping the last bubble fully visible.
pub const SCROLL_OVERSHOOT_PX: i32 = 50;

/// Scroll the transcript to its bottom after [`SCROLL_DELAY_MS`].
pub fn scroll_to_bottom(transcript: NodeRef<Div>) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::callback::Timeout::new(SCROLL_DELAY_MS, move || {
            if let Some(el) = transcript.get_untracked() {
                el.set_scroll_top(el.scroll_height() + SCROLL_OVERSHOOT_PX);
            }
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = transcript;
    }
}

/// Move keyboard focus back to the question input.
pub fn focus_input(input: NodeRef<Input>) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = input.get_untracked() {
            let _ = el.focus();
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
    }
}
