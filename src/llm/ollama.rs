//! Ollama API client: `POST /api/chat` (non-streaming) and `POST /api/embed`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Message};

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(base_url: String, temperature: f32, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, temperature })
    }

    pub async fn chat(&self, model: &str, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        let msgs = build_messages(system, messages);
        let body = OllamaRequest { model, messages: &msgs, stream: false, options: OllamaOptions { temperature: self.temperature } };
        let text = self.send_json("/api/chat", &body).await?;
        parse_chat_response(&text)
    }

    pub async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>, LlmError> {
        let body = EmbedRequest { model, input: text };
        let text = self.send_json("/api/embed", &body).await?;
        parse_embed_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    model: String,
    message: OllamaMessage,
    #[serde(default)]
    done_reason: Option<String>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

fn build_messages(system: &str, messages: &[Message]) -> Vec<Message> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(Message::system(system));
    }
    out.extend_from_slice(messages);
    out
}

fn parse_chat_response(text: &str) -> Result<ChatResponse, LlmError> {
    let resp: OllamaResponse = serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    Ok(ChatResponse {
        content: resp.message.content,
        model: resp.model,
        stop_reason: resp.done_reason.unwrap_or_else(|| "stop".to_string()),
    })
}

fn parse_embed_response(text: &str) -> Result<Vec<f32>, LlmError> {
    let resp: EmbedResponse = serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    resp.embeddings
        .into_iter()
        .next()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LlmError::ApiParse("embed response carried no embedding".to_string()))
}

#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;
