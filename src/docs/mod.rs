//! Document index used to answer questions from uploaded documents.
//!
//! SYSTEM CONTEXT
//! ==============
//! Documents are chunked and embedded offline with the same Ollama model the
//! server talks to. The result is a JSON Lines file, one chunk per line:
//!
//! ```text
//! {"source": "manuale.pdf", "content": "...", "embedding": [0.12, -0.03, ...]}
//! ```
//!
//! Startup loads the whole file into memory; questions are matched against it
//! by cosine similarity.

use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_DOCS_INDEX_PATH: &str = "vectorstore_docs/index.jsonl";

/// Number of chunks handed to the model as context.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("cannot read document index: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("document index is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentChunk {
    #[serde(default = "unknown_source")]
    pub source: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

fn unknown_source() -> String {
    "N/A".to_owned()
}

/// In-memory document index.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    chunks: Vec<DocumentChunk>,
}

impl DocumentIndex {
    /// Path of the index file from `DOCS_INDEX_PATH`, or the default.
    #[must_use]
    pub fn path_from_env() -> String {
        std::env::var("DOCS_INDEX_PATH").unwrap_or_else(|_| DEFAULT_DOCS_INDEX_PATH.to_owned())
    }

    /// Read and parse an index file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or has no chunks.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DocsError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text)
    }

    /// Parse JSON Lines text. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Parse`] with the 1-based line number of the first
    /// bad line, or [`DocsError::Empty`] if no chunk was found.
    pub fn parse(text: &str) -> Result<Self, DocsError> {
        let mut chunks = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let chunk: DocumentChunk =
                serde_json::from_str(line).map_err(|e| DocsError::Parse { line: i + 1, message: e.to_string() })?;
            chunks.push(chunk);
        }
        if chunks.is_empty() {
            return Err(DocsError::Empty);
        }
        Ok(Self { chunks })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `k` chunks most similar to `query`, best first.
    ///
    /// Chunks whose embedding has a different dimension, or a zero norm, never match.
    #[must_use]
    pub fn search(&self, query: &[f32], k: usize) -> Vec<&DocumentChunk> {
        if self.is_empty() || k == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(f32, &DocumentChunk)> = self
            .chunks
            .iter()
            .filter_map(|chunk| cosine_similarity(query, &chunk.embedding).map(|score| (score, chunk)))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().take(k).map(|(_, chunk)| chunk).collect()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
