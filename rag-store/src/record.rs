//! Core data models used by the library.

use serde::Serialize;
use serde_json::Value;

/// Query parameters for RAG retrieval.
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: usize,
}

/// A single retrieval hit: passage text plus similarity score.
///
/// `text` is the metadata `text` field of the indexed passage (empty when the
/// record has none); `metadata` keeps the full metadata object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RagHit {
    pub id: String,
    pub score: f32,
    pub text: String,
    pub metadata: Value,
}

impl RagHit {
    /// Builds a hit from an id, score and metadata object, extracting `text`.
    pub fn from_metadata(id: impl Into<String>, score: f32, metadata: Value) -> Self {
        let text = metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self {
            id: id.into(),
            score,
            text,
            metadata,
        }
    }
}
