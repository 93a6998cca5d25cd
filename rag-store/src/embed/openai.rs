//! OpenAI embedding provider.
//!
//! The dimensionality is not configured: it is measured once by embedding a
//! sentinel string and then enforced on every later call.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use tracing::{info, warn};

use crate::{EmbeddingsProvider, RagError};

/// Text embedded at startup to learn the model's dimensionality.
pub const DIMENSION_PROBE: &str = "ping";

/// OpenAI embedding provider (async).
#[derive(Clone)]
pub struct OpenAiEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl OpenAiEmbedder {
    /// Embeds [`DIMENSION_PROBE`] once and fixes the dimension for the
    /// lifetime of the returned embedder.
    ///
    /// # Errors
    /// Provider errors from the probe call, or `RagError::Config` when the
    /// provider returns an empty vector.
    pub async fn probe(svc: Arc<LlmServiceProfiles>) -> Result<Self, RagError> {
        let v = svc.embed(DIMENSION_PROBE).await?;
        if v.is_empty() {
            return Err(RagError::Config(
                "embedding model returned an empty vector for the dimension probe".into(),
            ));
        }
        info!(
            model = %svc.profiles().1.model,
            dim = v.len(),
            "embedding dimension probed"
        );
        Ok(Self { svc, dim: v.len() })
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>
    {
        Box::pin(async move {
            let resp = self.svc.embed(text).await?;

            if resp.len() != self.dim {
                warn!(got = resp.len(), want = self.dim, "embedding dimension changed");
                return Err(RagError::VectorSizeMismatch {
                    got: resp.len(),
                    want: self.dim,
                });
            }

            Ok(resp)
        })
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
