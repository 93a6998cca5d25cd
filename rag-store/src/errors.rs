//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or missing configuration (startup).
    #[error("config error: {0}")]
    Config(String),

    /// The configured index does not exist in the vector store (startup).
    #[error(
        "Pinecone index '{name}' not found (available: [{}]). Create it (and upsert vectors) before asking questions.",
        .available.join(", ")
    )]
    IndexNotFound { name: String, available: Vec<String> },

    /// Embedding model and index disagree on dimensionality (startup).
    #[error("embedding dimension {embedder} does not match index '{index}' dimension {want}")]
    DimensionMismatch {
        index: String,
        want: usize,
        embedder: usize,
    },

    /// A vector had the wrong dimensionality for this process.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// `top_k` must be a positive integer.
    #[error("top_k must be > 0")]
    InvalidTopK,

    /// Transport-level failure talking to Pinecone.
    #[error("pinecone transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pinecone answered with a non-success status.
    #[error("pinecone HTTP {status} from {url}: {snippet}")]
    Status {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// Pinecone answered with a body we could not decode.
    #[error("pinecone decode error: {0}")]
    Decode(String),

    /// Embedding provider failure.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),
}

impl RagError {
    /// True for failures that mean the deployment is misconfigured and the
    /// process must not start serving.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            RagError::Config(_) | RagError::IndexNotFound { .. } | RagError::DimensionMismatch { .. }
        )
    }
}
