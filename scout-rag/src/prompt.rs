//! Prompt builder: grounding instructions + the retrieved context block.

use rag_store::RagHit;

/// Separates passages inside the context block.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Returned verbatim when retrieval finds nothing. The model is not called.
pub const NO_CONTEXT_ANSWER: &str = "No relevant information found in the vector database.";

/// System instructions for grounded answers over scouting-report excerpts.
pub const SYSTEM_PROMPT: &str = "\
You are ScoutBot, an assistant for baseball scouting reports. \
Prospect questions must be answered using only the facts in the Context section of the \
user message. The context holds one or more scouting-report excerpts, usually shaped like:
  SCOUTING REPORT: <Name> - <Pos> (<Year>) | <Narrative> | <Grades>

Follow these rules:
1. Grounding: use nothing that is absent from the context. If the answer is not there, say so in one short sentence.
2. Numeric constraints: when the question sets thresholds (for example \"changeup 55 or better\" or \"strikeout rate under 20%\"), list only players whose grades or stats meet every condition. Partial matches do not qualify.
3. Filters: apply every implied filter such as handedness, year, position, ETA or league. An excerpt that lacks the field does not qualify.
4. One mention per player: name each player at most once. With duplicates or several years, use the excerpt that best fits the question.
5. Compact output: prefer short bulleted or numbered lists (Name - key grades or traits) over prose.
6. Exact grades: quote numeric grades as written (\"Changeup 60\", not \"plus changeup\").
7. Self-check: before answering, verify every item against the context and drop anything it does not support.

Give the answer directly. Source excerpts are shown separately when requested, so do not include citations or quoted excerpts yourself.";

/// Joins passage texts in retrieval order with [`CONTEXT_DELIMITER`].
///
/// # Example
/// ```
/// # use rag_store::RagHit;
/// # use scout_rag::prompt::build_context;
/// let hits = vec![
///     RagHit::from_metadata("1", 0.9, serde_json::json!({"text": "Doe"})),
///     RagHit::from_metadata("2", 0.8, serde_json::json!({"text": "Roe"})),
/// ];
/// assert_eq!(build_context(&hits), "Doe\n\n---\n\nRoe");
/// ```
pub fn build_context(hits: &[RagHit]) -> String {
    hits.iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}

/// The user message sent to the chat model.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!("Context:\n{context}\n\nQuestion:\n{question}")
}
