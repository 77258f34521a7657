use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::state::test_helpers::{MOCK_EMBEDDING, MockDb, MockLlm, test_app_state_with_llm};

fn docs_index() -> Arc<DocumentIndex> {
    let lines = [
        json!({ "source": "ferie.pdf", "content": "Le ferie si chiedono al responsabile.", "embedding": MOCK_EMBEDDING }),
        json!({ "source": "mensa.pdf", "content": "La mensa apre alle 12.", "embedding": [0.0, 1.0] }),
    ]
    .map(|v| v.to_string())
    .join("\n");
    Arc::new(DocumentIndex::parse(&lines).unwrap())
}

fn state_with(llm: Arc<MockLlm>, db: Option<Arc<MockDb>>, docs: bool) -> AppState {
    let mut state = test_app_state_with_llm(llm);
    if let Some(db) = db {
        state = state.with_database(db);
    }
    if docs {
        state = state.with_documents(docs_index());
    }
    state
}

// =========================================================================
// strip_reasoning
// =========================================================================

#[test]
fn strip_reasoning_keeps_text_after_think_block() {
    assert_eq!(strip_reasoning("<think>hmm</think>\nciao"), "ciao");
}

#[test]
fn strip_reasoning_uses_last_closing_tag() {
    assert_eq!(strip_reasoning("<think>a</think>b</think> c "), "c");
}

#[test]
fn strip_reasoning_passes_plain_replies_through() {
    assert_eq!(strip_reasoning("  risposta semplice\n"), "risposta semplice");
}

// =========================================================================
// classify
// =========================================================================

#[test]
fn classify_routes_database_words() {
    assert_eq!(classify("Quante righe ha la TABELLA clienti?"), Route::Database);
    assert_eq!(classify("fammi una query"), Route::Database);
    assert_eq!(classify("Elenca da ordini gli ultimi 5"), Route::Database);
}

#[test]
fn classify_sends_everything_else_to_documents() {
    assert_eq!(classify("Come chiedo le ferie?"), Route::Documents);
    assert_eq!(classify("dati"), Route::Documents);
}

// =========================================================================
// clean_generated_sql
// =========================================================================

#[test]
fn clean_sql_drops_reasoning_and_newlines() {
    let reply = "<think>devo contare</think>\nSELECT COUNT(*)\nFROM clienti;\n";
    assert_eq!(clean_generated_sql(reply), "SELECT COUNT(*) FROM clienti");
}

#[test]
fn clean_sql_drops_code_fence_and_quotes() {
    assert_eq!(clean_generated_sql("```sql\nSELECT 1\n```"), "SELECT 1");
    assert_eq!(clean_generated_sql("\"SELECT nome FROM clienti\""), "SELECT nome FROM clienti");
    assert_eq!(clean_generated_sql("'SELECT 2'"), "SELECT 2");
}

// =========================================================================
// answer_question: common
// =========================================================================

#[tokio::test]
async fn answer_question_rejects_blank_question() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let state = state_with(mock.clone(), None, true);

    let err = answer_question(&state, " \n ").await.unwrap_err();
    assert!(matches!(err, AskError::EmptyQuestion));
    assert!(mock.seen.lock().unwrap().is_empty());
    assert!(mock.embedded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn answer_question_without_documents_is_not_ready() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let state = state_with(mock.clone(), None, false);

    let answer = answer_question(&state, "Come chiedo le ferie?").await.unwrap();
    assert_eq!(answer, DOCUMENTS_NOT_READY);
    assert!(mock.seen.lock().unwrap().is_empty());
}

// =========================================================================
// answer_question: documents
// =========================================================================

#[tokio::test]
async fn documents_answer_uses_closest_chunks_as_context() {
    let mock = Arc::new(MockLlm::replying("<think>...</think>Chiedile al responsabile."));
    let state = state_with(mock.clone(), None, true);

    let answer = answer_question(&state, "  Come chiedo le ferie?  ").await.unwrap();
    assert_eq!(answer, "Chiedile al responsabile.");

    assert_eq!(*mock.embedded.lock().unwrap(), vec!["Come chiedo le ferie?".to_owned()]);
    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "Parli italiano.");
    let prompt = &seen[0].1[0].content;
    assert!(prompt.starts_with("Contesto:\nLe ferie si chiedono al responsabile.\n\n---\n\nLa mensa apre alle 12."));
    assert!(prompt.ends_with("\n\nDomanda: Come chiedo le ferie?\n\nRisposta:"));
}

#[tokio::test]
async fn documents_answer_falls_back_on_empty_reply() {
    let mock = Arc::new(MockLlm::replying("<think>only thoughts</think>   "));
    let state = state_with(mock, None, true);
    let answer = answer_question(&state, "ciao").await.unwrap();
    assert_eq!(answer, EMPTY_ANSWER_FALLBACK);
}

#[tokio::test]
async fn documents_answer_propagates_model_errors() {
    let state = state_with(Arc::new(MockLlm::failing(500)), None, true);
    let err = answer_question(&state, "ciao").await.unwrap_err();
    assert!(matches!(err, AskError::Llm(LlmError::ApiResponse { status: 500, .. })));
}

// =========================================================================
// answer_question: database
// =========================================================================

#[tokio::test]
async fn database_answer_lists_result_rows() {
    let mock = Arc::new(MockLlm::replying("<think>facile</think>\nSELECT id, nome\nFROM clienti;"));
    let db = Arc::new(MockDb::with_rows(vec![vec![json!(1), json!("Rossi")], vec![json!(2), json!("Bianchi")]]));
    let state = state_with(mock.clone(), Some(db.clone()), true);

    let answer = answer_question(&state, "Elenca i clienti nella tabella").await.unwrap();
    assert_eq!(
        answer,
        "Query SQL Eseguita: SELECT id, nome FROM clienti\nRisultati:\nColonne: id, nome\nid: 1, nome: Rossi\nid: 2, nome: Bianchi\n"
    );
    assert_eq!(*db.executed.lock().unwrap(), vec!["SELECT id, nome FROM clienti".to_owned()]);

    let seen = mock.seen.lock().unwrap();
    assert!(seen[0].0.contains("Tabella: clienti"));
    assert!(seen[0].0.contains("  - nome (varchar(255))"));
    assert!(seen[0].0.contains(CANNOT_GENERATE_MARKER));
    assert_eq!(seen[0].1, vec![Message::user("Domanda Utente: Elenca i clienti nella tabella\nQuery SQL:")]);
    assert!(mock.embedded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn database_answer_reports_empty_result() {
    let mock = Arc::new(MockLlm::replying("SELECT * FROM clienti WHERE id = 99"));
    let state = state_with(mock, Some(Arc::new(MockDb::with_rows(Vec::new()))), false);

    let answer = answer_question(&state, "query cliente 99").await.unwrap();
    assert_eq!(answer, "Query eseguita, nessun risultato.\nSQL: SELECT * FROM clienti WHERE id = 99");
}

#[tokio::test]
async fn database_answer_refuses_non_select() {
    let mock = Arc::new(MockLlm::replying("<think>x</think>DELETE FROM clienti"));
    let db = Arc::new(MockDb::with_rows(Vec::new()));
    let state = state_with(mock, Some(db.clone()), false);

    let answer = answer_question(&state, "svuota la tabella clienti").await.unwrap();
    assert_eq!(answer, "Non sono riuscito a generare una query SQL valida. (LLM ha detto: 'DELETE FROM clienti')");
    assert!(db.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn database_answer_honors_cannot_generate_marker() {
    let mock = Arc::new(MockLlm::replying("NON POSSO GENERARE LA QUERY"));
    let db = Arc::new(MockDb::with_rows(Vec::new()));
    let state = state_with(mock, Some(db.clone()), false);

    let answer = answer_question(&state, "sql per il meteo di domani").await.unwrap();
    assert!(answer.starts_with("Non sono riuscito a generare una query SQL valida."));
    assert!(db.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn database_answer_reports_execution_error() {
    let mock = Arc::new(MockLlm::replying("SELECT x FROM clienti"));
    let state = state_with(mock, Some(Arc::new(MockDb::failing_query("colonna x sconosciuta"))), false);

    let answer = answer_question(&state, "query sui clienti").await.unwrap();
    assert!(answer.starts_with("Errore esecuzione SQL: Errore MySQL: "));
    assert!(answer.contains("colonna x sconosciuta"));
    assert!(answer.ends_with("\nSQL: SELECT x FROM clienti"));
}

#[tokio::test]
async fn database_answer_without_connection() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let state = state_with(mock.clone(), None, true);

    let answer = answer_question(&state, "quante tabelle ci sono?").await.unwrap();
    assert_eq!(answer, DATABASE_UNAVAILABLE);
    assert!(mock.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn database_answer_reports_schema_problems() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let state = state_with(mock.clone(), Some(Arc::new(MockDb::without_tables())), false);
    assert_eq!(answer_question(&state, "mostra le tabelle").await.unwrap(), DATABASE_EMPTY);

    let state = state_with(mock.clone(), Some(Arc::new(MockDb::failing_schema("accesso negato"))), false);
    let answer = answer_question(&state, "mostra le tabelle").await.unwrap();
    assert!(answer.starts_with("Errore ottenimento schema DB: Errore MySQL: "));
    assert!(answer.contains("accesso negato"));
    assert!(mock.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn database_answer_propagates_model_errors() {
    let state = state_with(Arc::new(MockLlm::failing(503)), Some(Arc::new(MockDb::with_rows(Vec::new()))), false);
    let err = answer_question(&state, "query clienti").await.unwrap_err();
    assert!(matches!(err, AskError::Llm(LlmError::ApiResponse { status: 503, .. })));
}
