use serde::{Deserialize, Serialize};

use super::content::InterleavedContent;
use super::{StackClient, StackError};

const QUERY_PATH: &str = "/v1/vector-io/query";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub top_k: u32,
    pub score_threshold: f64,
}

#[derive(Debug, Serialize)]
struct QueryChunksRequest<'a> {
    vector_db_id: &'a str,
    query: &'a str,
    params: QueryParams,
}

#[derive(Debug, Deserialize)]
struct QueryChunksResponse {
    chunks: Vec<Chunk>,
    #[serde(default)]
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct Chunk {
    content: InterleavedContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub content: String,
    pub score: Option<f64>,
}

impl StackClient {
    /// Query a vector collection by raw text. The stack embeds the query
    /// itself; results come back ranked, most relevant first.
    pub async fn query_chunks(
        &self,
        vector_db_id: &str,
        query: &str,
        params: QueryParams,
    ) -> Result<Vec<RetrievedChunk>, StackError> {
        let request = QueryChunksRequest {
            vector_db_id,
            query,
            params,
        };
        let response: QueryChunksResponse = self.post_json(QUERY_PATH, &request).await?;

        let chunks = response
            .chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| RetrievedChunk {
                content: chunk.content.to_text(),
                score: response.scores.get(i).copied(),
            })
            .collect();

        Ok(chunks)
    }
}
