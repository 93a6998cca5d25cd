//! Retrieval helpers: the vector-index seam and high-level RAG context.

use std::{future::Future, pin::Pin};

use tracing::trace;

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::{RagHit, RagQuery};

/// A read-only similarity index.
///
/// Implemented by [`crate::RagStore`] for Pinecone; tests plug in in-memory
/// indexes.
pub trait VectorIndex: Send + Sync {
    /// Returns up to `top_k` hits for `vector`, ordered by non-increasing score.
    fn query<'a>(
        &'a self,
        vector: &'a [f32],
        top_k: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>>;

    /// Dimensionality the index was created with.
    fn dimension(&self) -> usize;
}

/// Rejects queries that can never be served, before any network call.
pub fn check_query(vector: &[f32], top_k: usize, dim: usize) -> Result<(), RagError> {
    if top_k == 0 {
        return Err(RagError::InvalidTopK);
    }
    if vector.len() != dim {
        return Err(RagError::VectorSizeMismatch {
            got: vector.len(),
            want: dim,
        });
    }
    Ok(())
}

/// Startup check that the embedder and the index agree on dimensionality.
pub fn ensure_dimensions(
    index_name: &str,
    embedder_dim: usize,
    index_dim: usize,
) -> Result<(), RagError> {
    if embedder_dim != index_dim {
        return Err(RagError::DimensionMismatch {
            index: index_name.to_string(),
            want: index_dim,
            embedder: embedder_dim,
        });
    }
    Ok(())
}

/// Stable sort by descending score; equal scores keep their original order.
pub fn sort_by_score_desc(hits: &mut [RagHit]) {
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Embeds the query text and returns the ranked hits.
///
/// Embedding always completes before the index is queried.
///
/// # Errors
/// Returns embedding/provider errors or index failures.
pub async fn rag_context(
    index: &dyn VectorIndex,
    provider: &dyn EmbeddingsProvider,
    query: RagQuery<'_>,
) -> Result<Vec<RagHit>, RagError> {
    trace!("retrieve::rag_context top_k={}", query.top_k);
    if query.top_k == 0 {
        return Err(RagError::InvalidTopK);
    }

    let qv = provider.embed(query.text).await?;
    let hits = index.query(&qv, query.top_k).await?;

    trace!("retrieve::rag_context hits={}", hits.len());
    Ok(hits)
}
