use crate::errors::RagError;
use std::{future::Future, pin::Pin};

/// Provider interface for query embeddings.
///
/// Async because real providers (OpenAI, etc.) perform HTTP requests.
/// Implementations must return vectors of exactly [`EmbeddingsProvider::dimension`]
/// elements.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>;

    /// Dimensionality fixed for the lifetime of the provider.
    fn dimension(&self) -> usize;
}

pub mod openai;
