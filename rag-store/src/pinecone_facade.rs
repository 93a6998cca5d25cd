//! Thin adapter around the Pinecone REST API to isolate wire details.
//!
//! Two endpoints are used:
//! - control plane `GET {controller}/indexes` to resolve the index host and
//!   dimension once at startup;
//! - data plane `POST {host}/query` for similarity search.
//!
//! Nothing here creates, deletes or writes to an index.

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::RagConfig;
use crate::errors::RagError;
use crate::record::RagHit;

/// Index description as returned by the control plane.
#[derive(Clone, Debug, Deserialize)]
pub struct IndexModel {
    pub name: String,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub metric: Option<String>,
    pub host: String,
    #[serde(default)]
    pub spec: Value,
    #[serde(default)]
    pub status: Option<IndexStatus>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub state: String,
}

impl IndexModel {
    /// `(cloud, region)` when the index is serverless.
    pub fn serverless_location(&self) -> Option<(&str, &str)> {
        let s = self.spec.get("serverless")?;
        Some((s.get("cloud")?.as_str()?, s.get("region")?.as_str()?))
    }

    /// Data plane base URL. Pinecone reports bare hostnames; those get https.
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListIndexesResponse {
    #[serde(default)]
    indexes: Vec<IndexModel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredMatch>,
}

#[derive(Debug, Deserialize)]
struct ScoredMatch {
    id: String,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default)]
    metadata: Option<Value>,
}

/// A facade over the Pinecone HTTP API.
///
/// Holds one `reqwest::Client` with the auth and API-version headers baked in.
pub struct PineconeFacade {
    http: reqwest::Client,
    controller_url: String,
    namespace: Option<String>,
}

impl PineconeFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// # Errors
    /// `RagError::Config` for invalid config or header values,
    /// `RagError::Http` if the client cannot be built.
    pub fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut key = header::HeaderValue::from_str(&cfg.api_key)
            .map_err(|e| RagError::Config(format!("invalid PINECONE_API_KEY header: {e}")))?;
        key.set_sensitive(true);
        let version = header::HeaderValue::from_str(&cfg.api_version)
            .map_err(|e| RagError::Config(format!("invalid PINECONE_API_VERSION header: {e}")))?;

        let mut headers = header::HeaderMap::new();
        headers.insert("Api-Key", key);
        headers.insert("X-Pinecone-API-Version", version);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            controller_url: cfg.controller_url.trim_end_matches('/').to_string(),
            namespace: cfg.namespace.clone(),
        })
    }

    /// Lists all indexes visible to the API key.
    pub async fn list_indexes(&self) -> Result<Vec<IndexModel>, RagError> {
        let url = format!("{}/indexes", self.controller_url);
        debug!("GET {url}");

        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp).await?;
        let out: ListIndexesResponse = resp
            .json()
            .await
            .map_err(|e| RagError::Decode(format!("list indexes: {e}")))?;

        debug!(count = out.indexes.len(), "list_indexes completed");
        Ok(out.indexes)
    }

    /// Resolves one index by name.
    ///
    /// # Errors
    /// `RagError::IndexNotFound` when the name is not among the listed indexes.
    pub async fn find_index(&self, name: &str) -> Result<IndexModel, RagError> {
        let indexes = self.list_indexes().await?;
        let available: Vec<String> = indexes.iter().map(|i| i.name.clone()).collect();
        indexes
            .into_iter()
            .find(|i| i.name == name)
            .ok_or_else(|| RagError::IndexNotFound {
                name: name.to_string(),
                available,
            })
    }

    /// Similarity search against the index data plane.
    ///
    /// Returns hits in the order Pinecone produced them.
    pub async fn query(
        &self,
        index: &IndexModel,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RagHit>, RagError> {
        let started = Instant::now();
        let url = format!("{}/query", index.base_url());
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
            namespace: self.namespace.as_deref(),
        };

        debug!(index = %index.name, top_k, dim = vector.len(), "POST {url}");

        let resp = self.http.post(&url).json(&body).send().await?;
        let resp = check_status(resp).await?;
        let out: QueryResponse = resp
            .json()
            .await
            .map_err(|e| RagError::Decode(format!("query: {e}")))?;

        let hits: Vec<RagHit> = out
            .matches
            .into_iter()
            .map(|m| RagHit::from_metadata(m.id, m.score.unwrap_or(0.0), m.metadata.unwrap_or(Value::Null)))
            .collect();

        info!(
            index = %index.name,
            top_k,
            hits = hits.len(),
            latency_ms = started.elapsed().as_millis(),
            "pinecone query completed"
        );
        Ok(hits)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, RagError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let url = resp.url().to_string();
    let text = resp.text().await.unwrap_or_default();
    let snippet = ai_llm_service::error_handler::make_snippet(&text);

    error!(%status, %url, %snippet, "pinecone returned non-success status");
    Err(RagError::Status {
        status,
        url,
        snippet,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(host: &str, spec: Value) -> IndexModel {
        IndexModel {
            name: "scout-reports-index".into(),
            dimension: Some(3072),
            metric: Some("cosine".into()),
            host: host.into(),
            spec,
            status: None,
        }
    }

    #[test]
    fn bare_host_gets_https() {
        let m = model("scout-reports-index-abc.svc.aped-4627-b74a.pinecone.io", Value::Null);
        assert_eq!(
            m.base_url(),
            "https://scout-reports-index-abc.svc.aped-4627-b74a.pinecone.io"
        );
        let m = model("http://127.0.0.1:5081/", Value::Null);
        assert_eq!(m.base_url(), "http://127.0.0.1:5081");
    }

    #[test]
    fn serverless_location_is_read_from_spec() {
        let m = model("h", json!({"serverless": {"cloud": "aws", "region": "us-east-1"}}));
        assert_eq!(m.serverless_location(), Some(("aws", "us-east-1")));
        let m = model("h", json!({"pod": {"environment": "us-west1-gcp"}}));
        assert_eq!(m.serverless_location(), None);
    }

    #[test]
    fn query_request_uses_pinecone_field_names() {
        let v = [0.1f32, 0.2];
        let body = serde_json::to_value(QueryRequest {
            vector: &v,
            top_k: 6,
            include_metadata: true,
            include_values: false,
            namespace: None,
        })
        .unwrap();
        assert_eq!(body["topK"], 6);
        assert_eq!(body["includeMetadata"], true);
        assert_eq!(body["includeValues"], false);
        assert!(body.get("namespace").is_none());
    }

    #[test]
    fn list_response_tolerates_missing_optional_fields() {
        let out: ListIndexesResponse = serde_json::from_value(json!({
            "indexes": [{ "name": "sparse", "host": "sparse-x.pinecone.io" }]
        }))
        .unwrap();
        assert_eq!(out.indexes[0].dimension, None);
        assert!(out.indexes[0].status.is_none());
    }
}
