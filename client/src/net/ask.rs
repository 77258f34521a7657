//! HTTP client for the assistant's `POST /ask` endpoint.
//!
//! Client-side (hydrate): real HTTP call via `gloo-net`.
//! Server-side (SSR): stub returning [`AskError::Unavailable`], since a
//! question can only be submitted from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (transport, non-2xx status, undecodable body) collapses into
//! an [`AskError`] whose `Display` is the text shown in the error bubble. The
//! request is never retried and has no timeout.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "ask_test.rs"]
mod ask_test;

use super::types::{AskErrorBody, AskResponse};

/// Path of the question endpoint, relative to the page origin.
pub const ASK_ENDPOINT: &str = "/ask";

/// A failed `/ask` exchange, normalized to a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AskError {
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{0}")]
    Status(String),

    /// A 2xx body did not carry a `risposta` string.
    #[error("{0}")]
    Parse(String),

    #[error("not available on server")]
    Unavailable,
}

/// Message for a non-2xx response.
///
/// Prefers the body's `risposta`, then `errore` (first non-empty string),
/// falling back to the HTTP status line when the body has neither or is not
/// JSON at all.
pub fn status_error_message(status: u16, status_text: &str, body: &str) -> String {
    serde_json::from_str::<AskErrorBody>(body)
        .ok()
        .and_then(AskErrorBody::into_message)
        .unwrap_or_else(|| status_line_message(status, status_text))
}

fn status_line_message(status: u16, status_text: &str) -> String {
    format!("Errore Server: {status} {status_text}")
        .trim_end()
        .to_owned()
}

/// Extract the reply text from a 2xx body.
///
/// # Errors
///
/// Returns [`AskError::Parse`] if the body is not JSON or lacks `risposta`.
pub fn parse_answer(body: &str) -> Result<String, AskError> {
    serde_json::from_str::<AskResponse>(body)
        .map(|resp| resp.risposta)
        .map_err(|e| AskError::Parse(format!("risposta non valida: {e}")))
}

/// Submit one question via `POST /ask` and wait for the reply text.
///
/// # Errors
///
/// Returns an [`AskError`] if the request fails, the server responds with a
/// non-2xx status, or the success body cannot be decoded.
pub async fn ask(question: &str) -> Result<String, AskError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = super::types::AskRequest { domanda: question };
        let resp = gloo_net::http::Request::post(ASK_ENDPOINT)
            .json(&payload)
            .map_err(|e| AskError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AskError::Network(e.to_string()))?;

        let status = resp.status();
        let ok = resp.ok();
        let status_text = resp.status_text();
        let body = resp.text().await;

        if !ok {
            let body = body.unwrap_or_default();
            let message = status_error_message(status, &status_text, &body);
            log::warn!("ask failed: status={status} message={message}");
            return Err(AskError::Status(message));
        }
        let body = body.map_err(|e| AskError::Parse(e.to_string()))?;
        parse_answer(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = question;
        Err(AskError::Unavailable)
    }
}
