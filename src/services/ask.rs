//! Ask service — routes one question to the database or the documents.
//!
//! DESIGN
//! ======
//! Single-turn by construction: nothing from earlier questions is kept.
//! Questions mentioning database words (`tabella`, `sql`, ...) are turned
//! into one `SELECT` by the model and answered with the raw result rows.
//! Every other question is answered by the model from the document chunks
//! closest to it. Local reasoning models prefix replies with a
//! `<think>...</think>` block; only the text after the last closing tag is used.
//!
//! Problems on the database path (no connection, bad SQL, driver errors) are
//! answers, not failures: the user reads them in the chat. Only model errors
//! surface as [`AskError::Llm`].

use std::collections::BTreeSet;

use crate::db::{self, SqlDatabase};
use crate::docs::{DEFAULT_TOP_K, DocumentIndex};
use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use crate::state::AppState;

/// Returned when the model produced nothing but a reasoning block.
pub const EMPTY_ANSWER_FALLBACK: &str = "Non sono riuscito a elaborare la tua richiesta.";

/// Returned when a question is not for the database and no document index is loaded.
pub const DOCUMENTS_NOT_READY: &str = "Non so se la domanda sia per il DB o i documenti, e il sistema documenti non è pronto.";

pub const DATABASE_UNAVAILABLE: &str = "Errore: Impossibile connettersi al database.";
pub const DATABASE_EMPTY: &str = "Database vuoto o tabelle non trovate.";
pub const NO_RELEVANT_CONTEXT: &str = "Nessuna informazione pertinente trovata nei documenti.";

/// Exact reply the model is told to give when no single `SELECT` fits.
pub const CANNOT_GENERATE_MARKER: &str = "NON POSSO GENERARE LA QUERY";

/// Lowercase fragments that send a question to the database.
pub const DB_KEYWORDS: [&str; 8] = ["database", "tabella", "tabelle", "query", "sql", "dati di", "record di", "elenca da"];

const REASONING_END_TAG: &str = "</think>";
const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// Errors from answering a question.
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Which knowledge source a question goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Database,
    Documents,
}

/// Route by keyword, case-insensitively.
#[must_use]
pub fn classify(question: &str) -> Route {
    let lowered = question.to_lowercase();
    if DB_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Route::Database
    } else {
        Route::Documents
    }
}

/// Answer a question and return the user-facing text.
///
/// # Errors
///
/// Returns [`AskError::EmptyQuestion`] for blank input, or the model error.
pub async fn answer_question(state: &AppState, question: &str) -> Result<String, AskError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::EmptyQuestion);
    }

    let route = classify(question);
    tracing::info!(question, ?route, "question received");
    match (route, &state.docs) {
        (Route::Database, _) => answer_from_database(state.llm.as_ref(), state.db.as_deref(), question).await,
        (Route::Documents, Some(docs)) => {
            answer_from_documents(state.llm.as_ref(), &state.system_prompt, docs, question).await
        }
        (Route::Documents, None) => {
            tracing::warn!("no document index loaded");
            Ok(DOCUMENTS_NOT_READY.to_owned())
        }
    }
}

// =============================================================================
// DATABASE
// =============================================================================

async fn answer_from_database(
    llm: &dyn LlmChat,
    db: Option<&dyn SqlDatabase>,
    question: &str,
) -> Result<String, AskError> {
    let Some(db) = db else {
        return Ok(DATABASE_UNAVAILABLE.to_owned());
    };

    let tables = match db.schema().await {
        Ok(tables) => tables,
        Err(e) => {
            tracing::error!(error = %e, "schema lookup failed");
            return Ok(format!("Errore ottenimento schema DB: {e}"));
        }
    };
    if tables.is_empty() {
        return Ok(DATABASE_EMPTY.to_owned());
    }

    let system = sql_generation_prompt(&db::format_schema(&tables));
    let prompt = format!("Domanda Utente: {question}\nQuery SQL:");
    let response = llm.chat(&system, &[Message::user(prompt)]).await?;
    tracing::debug!(raw = %response.content, "model proposed SQL");

    let said = strip_reasoning(&response.content);
    let sql = clean_generated_sql(&response.content);
    if sql.to_uppercase().contains(CANNOT_GENERATE_MARKER) || !db::is_select_query(&sql) {
        return Ok(format!("Non sono riuscito a generare una query SQL valida. (LLM ha detto: '{said}')"));
    }

    let result = match db.select(&sql).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, sql = %sql, "generated query failed");
            return Ok(format!("Errore esecuzione SQL: {e}\nSQL: {sql}"));
        }
    };
    tracing::info!(rows = result.rows.len(), "generated query succeeded");

    if result.rows.is_empty() {
        return Ok(format!("Query eseguita, nessun risultato.\nSQL: {sql}"));
    }

    let mut answer = format!("Query SQL Eseguita: {sql}\nRisultati:\nColonne: {}\n", result.columns.join(", "));
    for row in &result.rows {
        answer.push_str(&db::format_row(&result.columns, row));
        answer.push('\n');
    }
    Ok(answer)
}

fn sql_generation_prompt(schema: &str) -> String {
    format!(
        "Sei un esperto di MySQL. Il tuo compito è generare UNA SOLA query SQL SELECT valida per rispondere alla domanda dell'utente, basandoti sullo schema del database fornito.\n\
         IMPORTANTE: La tua risposta DEVE contenere ESCLUSIVAMENTE la query SQL, e nient'altro.\n\
         Non includere spiegazioni, commenti, testo introduttivo, tag di pensiero, o qualsiasi altra cosa prima o dopo la query SQL.\n\
         Se la domanda non può essere risposta con una singola query SELECT o richiede informazioni non presenti nello schema, la tua risposta DEVE essere ESATTAMENTE la stringa \"{CANNOT_GENERATE_MARKER}\".\n\n\
         {schema}"
    )
}

/// Reduce a model reply to a single-line SQL statement.
///
/// Drops the reasoning block, Markdown code fences, one pair of outer quotes,
/// line breaks, and a trailing semicolon.
#[must_use]
pub fn clean_generated_sql(reply: &str) -> String {
    let mut sql = strip_reasoning(reply);
    if let Some(inner) = sql.strip_prefix("```") {
        let inner = inner.strip_suffix("```").unwrap_or(inner);
        sql = inner
            .strip_prefix("sql")
            .or_else(|| inner.strip_prefix("SQL"))
            .unwrap_or(inner)
            .trim();
    }
    for quote in ['"', '\''] {
        if sql.len() >= 2 && sql.starts_with(quote) && sql.ends_with(quote) {
            sql = sql[1..sql.len() - 1].trim();
            break;
        }
    }
    let single_line = sql.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ");
    single_line.trim_end_matches(';').trim_end().to_owned()
}

// =============================================================================
// DOCUMENTS
// =============================================================================

async fn answer_from_documents(
    llm: &dyn LlmChat,
    system: &str,
    docs: &DocumentIndex,
    question: &str,
) -> Result<String, AskError> {
    let query = llm.embed(question).await?;
    let hits = docs.search(&query, DEFAULT_TOP_K);

    let context = if hits.is_empty() {
        NO_RELEVANT_CONTEXT.to_owned()
    } else {
        let sources: BTreeSet<&str> = hits.iter().map(|c| c.source.as_str()).collect();
        tracing::info!(?sources, "document sources");
        hits.iter().map(|c| c.content.as_str()).collect::<Vec<_>>().join(CHUNK_SEPARATOR)
    };

    let prompt = format!("Contesto:\n{context}\n\nDomanda: {question}\n\nRisposta:");
    let response = llm.chat(system, &[Message::user(prompt)]).await?;
    tracing::debug!(model = %response.model, stop_reason = %response.stop_reason, "model replied");

    let answer = strip_reasoning(&response.content);
    if answer.is_empty() {
        tracing::warn!("model reply was empty after removing reasoning");
        return Ok(EMPTY_ANSWER_FALLBACK.to_owned());
    }
    Ok(answer.to_owned())
}

/// Text after the last `</think>` tag, or the whole reply, trimmed.
pub fn strip_reasoning(reply: &str) -> &str {
    reply
        .rsplit_once(REASONING_END_TAG)
        .map_or(reply, |(_, answer)| answer)
        .trim()
}

#[cfg(test)]
#[path = "ask_test.rs"]
mod tests;
