//! LLM — adapter for the local Ollama model answering `/ask`.
//!
//! The same model both answers questions and embeds them for document search,
//! so query vectors match the ones stored in the document index.
//!
//! DESIGN
//! ======
//! Uses environment variables instead of config files. `LlmClient` owns the
//! configured model name and hides the Ollama wire format behind the
//! provider-neutral [`LlmChat`] trait so handlers can be tested with mocks.

pub mod config;
pub mod ollama;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client backed by an Ollama server.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: ollama::OllamaClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if a config value is invalid or the HTTP client fails.
    pub fn from_env() -> Result<(Self, LlmConfig), LlmError> {
        let config = LlmConfig::from_env()?;
        let client = Self::from_config(&config)?;
        Ok((client, config))
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let inner = ollama::OllamaClient::new(config.base_url.clone(), config.temperature, config.timeouts)?;
        Ok(Self { inner, model: config.model.clone() })
    }

    /// Return the configured model name (e.g. `"MariaCarla"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner.chat(&self.model, system, messages).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.inner.embed(&self.model, text).await
    }
}
