pub mod prompt;

use crate::config::Settings;
use crate::error::ChatError;
use crate::models::ChatResponse;
use crate::stack::vector_io::QueryParams;
use crate::stack::StackClient;

use self::prompt::{build_context_block, build_messages};

/// Retrieve-then-generate over a single vector collection and model.
#[derive(Debug, Clone)]
pub struct RagEngine {
    vector_db_id: String,
    model_id: String,
    params: QueryParams,
}

impl RagEngine {
    pub fn new(vector_db_id: impl Into<String>, model_id: impl Into<String>, params: QueryParams) -> Self {
        Self {
            vector_db_id: vector_db_id.into(),
            model_id: model_id.into(),
            params,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.vector_db_id.clone(),
            settings.llm_model_id.clone(),
            QueryParams {
                top_k: settings.rag_top_k,
                score_threshold: settings.rag_score_threshold,
            },
        )
    }

    pub async fn answer(&self, client: &StackClient, query: &str) -> Result<ChatResponse, ChatError> {
        tracing::info!("Searching vector DB: {}", self.vector_db_id);
        let chunks = client
            .query_chunks(&self.vector_db_id, query, self.params)
            .await
            .map_err(|e| ChatError::Retrieval(e.to_string()))?;

        for (rank, chunk) in chunks.iter().enumerate() {
            tracing::debug!(rank, score = ?chunk.score, "retrieved chunk");
        }
        tracing::info!("Retrieved {} chunks", chunks.len());

        let context_used: Vec<String> = chunks.into_iter().map(|c| c.content).collect();
        let context_block = build_context_block(&context_used);
        let messages = build_messages(&context_block, query);

        tracing::info!("Generating answer with {}", self.model_id);
        let answer = client
            .chat_completion(&self.model_id, &messages)
            .await
            .map_err(|e| ChatError::Generation(e.to_string()))?;

        Ok(ChatResponse { answer, context_used })
    }
}
