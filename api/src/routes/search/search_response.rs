use rag_store::RagHit;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// One ranked passage, without its raw metadata.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub text: String,
}

impl From<RagHit> for SearchHit {
    fn from(h: RagHit) -> Self {
        Self {
            id: h.id,
            score: h.score,
            text: h.text,
        }
    }
}
