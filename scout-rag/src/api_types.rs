//! Public API types re-used by external crates (e.g., the HTTP API layer).

use serde::Serialize;

use crate::cfg::DEFAULT_ASK_TOP_K;

/// Options that control retrieval for a single question.
///
/// # Example
/// ```
/// use scout_rag::AskOptions;
/// let opts = AskOptions { top_k: 10, ..AskOptions::default() };
/// assert!(!opts.show_sources);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AskOptions {
    /// Passages fetched from the index. Must be positive.
    pub top_k: usize,
    /// Attach formatted source lines to the answer.
    pub show_sources: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_ASK_TOP_K,
            show_sources: false,
        }
    }
}

/// How the answer text was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// The chat model answered from retrieved context.
    Generated,
    /// Retrieval came back empty; the model was not called.
    NoContext,
}

/// Final answer plus the diagnostic source lines, when requested.
///
/// `sources` is a side channel: it is never part of `answer`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QaAnswer {
    pub answer: String,
    pub kind: AnswerKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of an interactive session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// In-memory history of the current chat session. Never persisted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content: content.into(),
        });
    }

    /// Turns in the order they happened.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
