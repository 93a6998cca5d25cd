//! Typed error for the scout-rag crate.

use ai_llm_service::AiLlmError;
use rag_store::RagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    /// Retrieval side: Pinecone, embeddings, index resolution.
    #[error("RAG error: {0}")]
    Rag(#[from] RagError),

    /// Chat completion failures.
    #[error("LLM error: {0}")]
    Llm(#[from] AiLlmError),
}

impl ScoutError {
    /// True when the process is misconfigured and should not start.
    pub fn is_config(&self) -> bool {
        match self {
            ScoutError::Rag(RagError::Embedding(AiLlmError::Config(_))) => true,
            ScoutError::Rag(e) => e.is_config(),
            ScoutError::Llm(AiLlmError::Config(_)) => true,
            ScoutError::Llm(_) => false,
        }
    }

    /// True when the caller passed something that can never be served.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScoutError::Rag(RagError::InvalidTopK))
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::error_handler::ConfigError;

    use super::*;

    #[test]
    fn classifies_config_and_input_errors() {
        assert!(ScoutError::from(RagError::Config("x".into())).is_config());
        assert!(ScoutError::from(AiLlmError::Config(ConfigError::EmptyModel)).is_config());
        assert!(!ScoutError::from(RagError::InvalidTopK).is_config());
        assert!(ScoutError::from(RagError::InvalidTopK).is_invalid_input());
        assert!(!ScoutError::from(RagError::Decode("bad".into())).is_invalid_input());
    }
}
