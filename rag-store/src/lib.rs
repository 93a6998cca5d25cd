//! Retrieval facade over a pre-populated Pinecone index.
//!
//! This crate provides a small API to:
//! - Resolve the configured index once at startup (fail fast if it is missing)
//! - Embed a textual query and retrieve the top‑K scored passages
//!
//! Ingestion is out of scope: the index is owned and filled by an external
//! process. The design is flat and splits responsibilities into focused modules.

mod config;
mod embed;
mod errors;
mod pinecone_facade;
mod record;
mod retrieve;

pub use config::RagConfig;
pub use embed::{EmbeddingsProvider, openai::OpenAiEmbedder};
pub use errors::RagError;
pub use pinecone_facade::IndexModel;
pub use record::{RagHit, RagQuery};
pub use retrieve::{VectorIndex, check_query, ensure_dimensions, rag_context, sort_by_score_desc};

use std::{future::Future, pin::Pin};

use tracing::{debug, info, trace, warn};

/// High-level facade that wires configuration and the Pinecone client.
///
/// Construct it with [`RagStore::connect`]; the index lookup happens exactly
/// once there and the store is read-only afterwards.
pub struct RagStore {
    client: pinecone_facade::PineconeFacade,
    index: IndexModel,
    dim: usize,
}

impl RagStore {
    /// Connects to Pinecone and resolves the configured index.
    ///
    /// # Errors
    /// - `RagError::Config` for invalid config or an index without a dense dimension
    /// - `RagError::IndexNotFound` if the index does not exist
    /// - transport/status errors from the control plane
    pub async fn connect(cfg: RagConfig) -> Result<Self, RagError> {
        trace!("RagStore::connect index={}", cfg.index_name);
        let client = pinecone_facade::PineconeFacade::new(&cfg)?;
        let index = client.find_index(&cfg.index_name).await?;

        let dim = index.dimension.filter(|d| *d > 0).ok_or_else(|| {
            RagError::Config(format!(
                "Pinecone index '{}' reports no dense dimension",
                index.name
            ))
        })?;

        match index.serverless_location() {
            Some((cloud, region)) if cloud != cfg.cloud || region != cfg.region => {
                warn!(
                    index = %index.name,
                    %cloud,
                    %region,
                    expected_cloud = %cfg.cloud,
                    expected_region = %cfg.region,
                    "index location differs from PINECONE_CLOUD/PINECONE_REGION"
                );
            }
            _ => {}
        }
        if let Some(status) = index.status.as_ref().filter(|s| !s.ready) {
            warn!(index = %index.name, state = %status.state, "index is not ready yet");
        }

        info!(
            index = %index.name,
            dim,
            metric = index.metric.as_deref().unwrap_or("unknown"),
            "Pinecone index resolved"
        );

        Ok(Self {
            client,
            index,
            dim,
        })
    }

    /// Name of the resolved index.
    pub fn index_name(&self) -> &str {
        &self.index.name
    }

    /// Similarity search for a ready query vector.
    ///
    /// The vector length is checked against the index dimension before any
    /// request is sent. Hits come back ordered by non-increasing score.
    ///
    /// # Errors
    /// `InvalidTopK`, `VectorSizeMismatch`, or Pinecone failures.
    pub async fn search_by_vector(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RagHit>, RagError> {
        check_query(vector, top_k, self.dim)?;
        let mut hits = self.client.query(&self.index, vector, top_k).await?;
        sort_by_score_desc(&mut hits);
        debug!(hits = hits.len(), "RagStore::search_by_vector done");
        Ok(hits)
    }
}

impl VectorIndex for RagStore {
    fn query<'a>(
        &'a self,
        vector: &'a [f32],
        top_k: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>> {
        Box::pin(self.search_by_vector(vector, top_k))
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
