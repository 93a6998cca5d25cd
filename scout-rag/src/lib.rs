//! Question answering over baseball scouting reports.
//!
//! Public API: [`ScoutBot`]. A question is embedded, the nearest report
//! excerpts are pulled from the Pinecone index, and the chat model answers
//! from those excerpts only. Each hop awaits the previous one.
//!
//! Build the context object once with [`ScoutBot::from_env`] (or
//! [`ScoutBot::initialize`]) and share it behind `Arc`; it is immutable after
//! construction.

mod api_types;
mod cfg;
mod error;
mod llm;
mod progress;
pub mod prompt;
pub mod sources;

pub use api_types::{AnswerKind, AskOptions, ChatRole, ChatTurn, QaAnswer, Transcript};
pub use cfg::{DEFAULT_ASK_TOP_K, DEFAULT_SEARCH_TOP_K, SOURCE_WIDTH};
pub use error::ScoutError;
pub use llm::{ChatModel, OpenAiChat};
pub use progress::{IndicatifProgress, NoopProgress, Progress};

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use rag_store::{
    EmbeddingsProvider, OpenAiEmbedder, RagConfig, RagHit, RagQuery, RagStore, VectorIndex,
    ensure_dimensions,
};
use tracing::{debug, info};

/// The retrieval-augmented answering pipeline.
///
/// Holds the three collaborators behind their seams so tests can plug in
/// in-memory versions.
#[derive(Clone)]
pub struct ScoutBot {
    embedder: Arc<dyn EmbeddingsProvider>,
    index: Arc<dyn VectorIndex>,
    chat: Arc<dyn ChatModel>,
}

impl ScoutBot {
    /// Wires already-built collaborators without any startup checks.
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        index: Arc<dyn VectorIndex>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            embedder,
            index,
            chat,
        }
    }

    /// Reads `PINECONE_*`, `SCOUTBOT_INDEX` and `OPENAI_*` from the
    /// environment and runs [`ScoutBot::initialize`].
    ///
    /// # Errors
    /// Configuration errors (missing `PINECONE_API_KEY`, unknown index,
    /// dimension mismatch) and provider failures during the startup probe.
    pub async fn from_env() -> Result<Self, ScoutError> {
        let rag_cfg = RagConfig::from_env()?;
        let svc = Arc::new(LlmServiceProfiles::from_env()?);
        Self::initialize(rag_cfg, svc).await
    }

    /// One-time startup: probes the embedding dimension, resolves the index
    /// and checks that both agree.
    ///
    /// # Errors
    /// See [`ScoutBot::from_env`].
    pub async fn initialize(
        rag_cfg: RagConfig,
        svc: Arc<LlmServiceProfiles>,
    ) -> Result<Self, ScoutError> {
        let embedder = OpenAiEmbedder::probe(svc.clone()).await?;
        let store = RagStore::connect(rag_cfg).await?;
        ensure_dimensions(store.index_name(), embedder.dimension(), store.dimension())?;

        info!(
            index = %store.index_name(),
            dim = store.dimension(),
            chat_model = %svc.profiles().0.model,
            "ScoutBot ready"
        );

        Ok(Self::new(
            Arc::new(embedder),
            Arc::new(store),
            Arc::new(OpenAiChat::new(svc)),
        ))
    }

    /// Answers with default options and returns only the text.
    ///
    /// # Example
    /// ```no_run
    /// # use scout_rag::ScoutBot;
    /// # #[tokio::main] async fn main() -> Result<(), scout_rag::ScoutError> {
    /// let bot = ScoutBot::from_env().await?;
    /// println!("{}", bot.ask("Which shortstops have a 60 arm?").await?);
    /// # Ok(()) }
    /// ```
    pub async fn ask(&self, question: &str) -> Result<String, ScoutError> {
        let qa = self.ask_with_opts(question, AskOptions::default()).await?;
        Ok(qa.answer)
    }

    /// Answers and optionally attaches formatted source lines.
    ///
    /// # Errors
    /// `InvalidTopK` for `top_k == 0`; otherwise provider failures propagate
    /// unchanged. An empty retrieval is not an error.
    pub async fn ask_with_opts(
        &self,
        question: &str,
        opts: AskOptions,
    ) -> Result<QaAnswer, ScoutError> {
        self.ask_with_progress(question, opts, &NoopProgress).await
    }

    /// [`ScoutBot::ask_with_opts`] with progress callbacks for interactive use.
    pub async fn ask_with_progress(
        &self,
        question: &str,
        opts: AskOptions,
        prog: &dyn Progress,
    ) -> Result<QaAnswer, ScoutError> {
        prog.message("embedding question");
        let hits = self.retrieve(question, opts.top_k).await;
        let hits = match hits {
            Ok(h) => h,
            Err(e) => {
                prog.finish();
                return Err(e);
            }
        };

        let sources = if opts.show_sources {
            sources::fmt_sources(&hits)
        } else {
            Vec::new()
        };

        if hits.is_empty() {
            prog.finish();
            debug!("no passages retrieved, skipping chat");
            return Ok(QaAnswer {
                answer: prompt::NO_CONTEXT_ANSWER.to_string(),
                kind: AnswerKind::NoContext,
                sources,
            });
        }

        prog.step("asking the model");
        let context = prompt::build_context(&hits);
        let user = prompt::build_user_prompt(question, &context);
        let out = self.chat.chat(prompt::SYSTEM_PROMPT, &user).await;
        prog.finish();

        Ok(QaAnswer {
            answer: out?.trim().to_string(),
            kind: AnswerKind::Generated,
            sources,
        })
    }

    /// Raw ranked hits for `query`, without calling the chat model.
    ///
    /// `top_k` defaults to [`DEFAULT_SEARCH_TOP_K`].
    pub async fn similarity_search(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<RagHit>, ScoutError> {
        self.retrieve(query, top_k.unwrap_or(DEFAULT_SEARCH_TOP_K))
            .await
    }

    async fn retrieve(&self, text: &str, top_k: usize) -> Result<Vec<RagHit>, ScoutError> {
        let query = RagQuery { text, top_k };
        let hits = rag_store::rag_context(&*self.index, &*self.embedder, query).await?;
        debug!(top_k, hits = hits.len(), "retrieved passages");
        Ok(hits)
    }
}
