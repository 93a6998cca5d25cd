//! Chat model seam and its OpenAI implementation.

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use tracing::{debug, info};

/// Single-shot chat completion: `(system, user)` in, assistant text out.
pub trait ChatModel: Send + Sync {
    fn chat<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;
}

/// Chat through the shared OpenAI `chat` profile.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use ai_llm_service::LlmServiceProfiles;
/// # use scout_rag::{ChatModel, OpenAiChat};
/// # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let chat = OpenAiChat::new(Arc::new(LlmServiceProfiles::from_env()?));
/// let out = chat.chat("You are terse.", "Hello!").await?;
/// println!("{out}");
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct OpenAiChat {
    svc: Arc<LlmServiceProfiles>,
}

impl OpenAiChat {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl ChatModel for OpenAiChat {
    fn chat<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
        Box::pin(async move {
            let started = Instant::now();
            debug!(user_chars = user.len(), "OpenAiChat::chat");
            let out = self.svc.generate(user, Some(system)).await?;
            info!(
                model = %self.svc.profiles().0.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion done"
            );
            Ok(out)
        })
    }
}
