//! Runtime configuration for the Pinecone index.

use std::fmt;

use crate::errors::RagError;

pub const DEFAULT_INDEX_NAME: &str = "scout-reports-index";
pub const DEFAULT_CLOUD: &str = "aws";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_API_VERSION: &str = "2025-01";

/// Configuration for retrieval against a pre-populated Pinecone index.
///
/// `Debug` never prints the API key.
#[derive(Clone)]
pub struct RagConfig {
    /// Pinecone API key (`PINECONE_API_KEY`, required).
    pub api_key: String,
    /// Target index name (`SCOUTBOT_INDEX`).
    pub index_name: String,
    /// Expected serverless cloud (`PINECONE_CLOUD`).
    pub cloud: String,
    /// Expected serverless region (`PINECONE_REGION`).
    pub region: String,
    /// Control plane base URL (`PINECONE_CONTROLLER_URL`).
    pub controller_url: String,
    /// Value of the `X-Pinecone-API-Version` header (`PINECONE_API_VERSION`).
    pub api_version: String,
    /// Optional namespace queried inside the index (`PINECONE_NAMESPACE`).
    pub namespace: Option<String>,
}

impl RagConfig {
    /// Creates a config with defaults for everything except the API key.
    pub fn new_default(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: DEFAULT_INDEX_NAME.into(),
            cloud: DEFAULT_CLOUD.into(),
            region: DEFAULT_REGION.into(),
            controller_url: DEFAULT_CONTROLLER_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
            namespace: None,
        }
    }

    /// Reads the process environment.
    ///
    /// # Errors
    /// `RagError::Config` when `PINECONE_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(get: F) -> Result<Self, RagError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| get(k).filter(|v| !v.trim().is_empty());

        let api_key = var("PINECONE_API_KEY").ok_or_else(|| {
            RagError::Config("PINECONE_API_KEY environment variable not set".into())
        })?;

        let cfg = Self {
            api_key,
            index_name: var("SCOUTBOT_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.into()),
            cloud: var("PINECONE_CLOUD").unwrap_or_else(|| DEFAULT_CLOUD.into()),
            region: var("PINECONE_REGION").unwrap_or_else(|| DEFAULT_REGION.into()),
            controller_url: var("PINECONE_CONTROLLER_URL")
                .unwrap_or_else(|| DEFAULT_CONTROLLER_URL.into()),
            api_version: var("PINECONE_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            namespace: var("PINECONE_NAMESPACE"),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.api_key.trim().is_empty() {
            return Err(RagError::Config("PINECONE_API_KEY is empty".into()));
        }
        if self.index_name.trim().is_empty() {
            return Err(RagError::Config("index name is empty".into()));
        }
        let url = self.controller_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RagError::Config(
                "PINECONE_CONTROLLER_URL must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for RagConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("cloud", &self.cloud)
            .field("region", &self.region)
            .field("controller_url", &self.controller_url)
            .field("api_version", &self.api_version)
            .field("namespace", &self.namespace)
            .finish()
    }
}
