//! OpenAI client used by ScoutBot for the two model-backed hops of the
//! pipeline: query embeddings and grounded chat completions.
//!
//! - [`services::open_ai_service::OpenAiService`]: raw REST client
//! - [`service_profiles::LlmServiceProfiles`]: `chat` + `embedding` profiles
//!   built once at startup and shared behind `Arc`
//! - [`config`]: model configs and env-driven defaults
//! - [`error_handler`]: unified [`AiLlmError`] and env helpers

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, Result};
pub use service_profiles::LlmServiceProfiles;
