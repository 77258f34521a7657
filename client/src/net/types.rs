//! Wire types for the `/ask` JSON exchange.
//!
//! Field names are Italian because the server contract is: `domanda` is the
//! question, `risposta` the answer, `errore` an error description.

use serde::{Deserialize, Serialize};

/// Request body of `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub domanda: &'a str,
}

/// Success body of `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub risposta: String,
}

/// Error body of `POST /ask`. Either field may be absent or non-string.
#[derive(Debug, Default, Deserialize)]
pub struct AskErrorBody {
    #[serde(default)]
    pub risposta: serde_json::Value,
    #[serde(default)]
    pub errore: serde_json::Value,
}

impl AskErrorBody {
    /// First truthy value among `risposta` and `errore`, as display text.
    ///
    /// Empty strings, `0`, `false` and `null` are skipped. Numbers and `true`
    /// print the way a browser would show them; objects and arrays become
    /// compact JSON.
    pub fn into_message(self) -> Option<String> {
        [self.risposta, self.errore].into_iter().find_map(truthy_text)
    }
}

fn truthy_text(value: serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::String(s) => (!s.is_empty()).then_some(s),
        Value::Number(n) => number_text(&n),
        other => Some(other.to_string()),
    }
}

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn number_text(n: &serde_json::Number) -> Option<String> {
    if n.is_f64() {
        let f = n.as_f64()?;
        if f == 0.0 {
            return None;
        }
        if f.fract() == 0.0 && f.abs() < 1e15 {
            return Some((f as i64).to_string());
        }
        return Some(f.to_string());
    }
    (n.as_i64() != Some(0)).then(|| n.to_string())
}
