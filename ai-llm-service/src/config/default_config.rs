//! Default OpenAI configs loaded from environment variables.
//!
//! Two roles are used by the question-answering pipeline:
//!
//! - **Chat**      → grounded answer generation (low temperature)
//! - **Embedding** → query embeddings for vector search
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`         = API key (optional here; the first call fails without it)
//! - `OPENAI_BASE_URL`        = API base URL (default `https://api.openai.com`)
//! - `OPENAI_CHAT_MODEL`      = chat model (default `gpt-4o-mini`)
//! - `OPENAI_EMBEDDING_MODEL` = embedding model (default `text-embedding-3-large`)
//! - `LLM_MAX_TOKENS`         = optional max tokens (u32)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, env_or, opt_env, validate_http_endpoint,
        validate_range_f32,
    },
};

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";

/// Answers favour determinism over creativity.
pub const CHAT_TEMPERATURE: f32 = 0.2;

fn openai_endpoint() -> Result<String, AiLlmError> {
    let endpoint = env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_ENDPOINT);
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;
    Ok(endpoint)
}

/// Constructs the **chat** profile used to compose answers.
///
/// # Env
/// - `OPENAI_CHAT_MODEL` (optional)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = None`
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    let cfg = LlmModelConfig {
        model: env_or("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
        endpoint: openai_endpoint()?,
        api_key: opt_env("OPENAI_API_KEY"),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(CHAT_TEMPERATURE),
        top_p: None,
        timeout_secs: None,
    };
    validate(&cfg)?;
    Ok(cfg)
}

/// Constructs the **embedding** profile used to vectorize questions.
///
/// # Env
/// - `OPENAI_EMBEDDING_MODEL` (optional)
///
/// # Defaults
/// - no sampling parameters
/// - `timeout_secs = None`
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let cfg = LlmModelConfig {
        model: env_or("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint: openai_endpoint()?,
        api_key: opt_env("OPENAI_API_KEY"),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: None,
    };
    validate(&cfg)?;
    Ok(cfg)
}

/// Checks the invariants every profile must hold before a client is built.
pub fn validate(cfg: &LlmModelConfig) -> Result<(), AiLlmError> {
    if cfg.model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }
    if let Some(t) = cfg.temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }
    if let Some(p) = cfg.top_p {
        validate_range_f32("top_p", p, 0.0, 1.0)?;
    }
    Ok(())
}
