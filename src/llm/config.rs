//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "MariaCarla";
/// System prompt for answers built from document context.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Rispondi in italiano basandoti ESCLUSIVAMENTE sul contesto. Se l'info non c'è, dillo.";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables. Every key is optional:
    ///
    /// - `OLLAMA_HOST`: default `http://localhost:11434`
    /// - `OLLAMA_MODEL_NAME`: default `MariaCarla`
    /// - `LLM_SYSTEM_PROMPT`: system prompt for document answers
    /// - `LLM_TEMPERATURE`: default 0.3, must lie in `0..=2`
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] for an out-of-range or unparsable
    /// temperature.
    pub fn from_env() -> Result<Self, LlmError> {
        let base_url = std::env::var("OLLAMA_HOST")
            .unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = std::env::var("OLLAMA_MODEL_NAME").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string());
        let system_prompt = std::env::var("LLM_SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let temperature = parse_temperature(std::env::var("LLM_TEMPERATURE").ok().as_deref())?;
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, model, system_prompt, temperature, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_temperature(raw: Option<&str>) -> Result<f32, LlmError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TEMPERATURE);
    };
    match raw.trim().parse::<f32>() {
        Ok(t) if t.is_finite() && (0.0..=MAX_TEMPERATURE).contains(&t) => Ok(t),
        _ => Err(LlmError::ConfigParse(format!(
            "invalid LLM_TEMPERATURE '{raw}' (expected a number between 0 and {MAX_TEMPERATURE})"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
