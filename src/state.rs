//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the model client, the system prompt for document answers, and
//! the two optional knowledge sources. Either source may be missing when its
//! backend was unavailable at startup; the ask service answers accordingly.
//! No conversation history lives here: each `/ask` is independent.

use std::sync::Arc;

use crate::db::SqlDatabase;
use crate::docs::DocumentIndex;
use crate::llm::LlmChat;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmChat>,
    pub system_prompt: Arc<str>,
    pub db: Option<Arc<dyn SqlDatabase>>,
    pub docs: Option<Arc<DocumentIndex>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, system_prompt: &str) -> Self {
        Self { llm, system_prompt: Arc::from(system_prompt), db: None, docs: None }
    }

    #[must_use]
    pub fn with_database(mut self, db: Arc<dyn SqlDatabase>) -> Self {
        self.db = Some(db);
        self
    }

    #[must_use]
    pub fn with_documents(mut self, docs: Arc<DocumentIndex>) -> Self {
        self.docs = Some(docs);
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
