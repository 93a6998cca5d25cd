use scout_rag::{AnswerKind, QaAnswer};
use serde::{Deserialize, Serialize};

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question about the scouting reports.
    pub question: String,
    /// Optional override of the number of retrieved passages.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Attach formatted source lines to the answer.
    #[serde(default)]
    pub show_sources: Option<bool>,
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final answer (plain text).
    pub answer: String,
    pub kind: AnswerKind,
    /// Present only when `show_sources` was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl AskResponse {
    pub fn from_answer(qa: QaAnswer, show_sources: bool) -> Self {
        Self {
            answer: qa.answer,
            kind: qa.kind,
            sources: show_sources.then_some(qa.sources),
        }
    }
}
