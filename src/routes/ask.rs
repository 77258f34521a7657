//! `POST /ask` — answer one question from the chat widget.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::services::ask::{AskError, answer_question};
use crate::state::AppState;

/// Reply for a missing, blank, or unreadable question.
pub const MISSING_QUESTION: &str = "Domanda mancante.";

#[derive(Debug, Default, Deserialize)]
pub struct AskBody {
    #[serde(default)]
    pub domanda: Option<String>,
}

/// JSON body sent back to the widget: `{"risposta": ..}` or `{"errore": ..}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AskReply {
    Answer { risposta: String },
    Failure { errore: String },
}

/// `POST /ask` — body `{"domanda": string}`.
pub async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskBody>, JsonRejection>,
) -> (StatusCode, Json<AskReply>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable /ask body");
            AskBody::default()
        }
    };
    let question = body.domanda.unwrap_or_default();

    match answer_question(&state, &question).await {
        Ok(risposta) => (StatusCode::OK, Json(AskReply::Answer { risposta })),
        Err(e) => ask_error_response(e),
    }
}

pub(crate) fn ask_error_response(err: AskError) -> (StatusCode, Json<AskReply>) {
    match err {
        AskError::EmptyQuestion => {
            (StatusCode::BAD_REQUEST, Json(AskReply::Answer { risposta: MISSING_QUESTION.to_owned() }))
        }
        AskError::Llm(e) => {
            tracing::error!(error = %e, "model request failed");
            (StatusCode::BAD_GATEWAY, Json(AskReply::Failure { errore: format!("Errore interno: {e}") }))
        }
    }
}

#[cfg(test)]
#[path = "ask_test.rs"]
mod tests;
