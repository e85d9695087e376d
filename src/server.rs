use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Settings;
use crate::error::ChatError;
use crate::models::{ChatResponse, HealthResponse};
use crate::rag::RagEngine;
use crate::stack::LazyStackClient;

pub struct AppState {
    pub settings: Settings,
    pub stack: LazyStackClient,
    pub rag_engine: RagEngine,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let stack = LazyStackClient::new(settings.base_url(), settings.request_timeout());
        let rag_engine = RagEngine::from_settings(&settings);
        Self {
            settings,
            stack,
            rag_engine,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ChatError> {
    let query = parse_query(&body)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let client = state
            .stack
            .get()
            .map_err(|e| ChatError::Configuration(e.to_string()))?;

        state.rag_engine.answer(client, &query).await
    }
    .instrument(span)
    .await
    .map(Json)
    .map_err(|e| {
        tracing::error!(%request_id, code = e.code(), "Error: {}", e);
        e
    })
}

/// Pull the `query` field out of a raw request body.
///
/// An empty or non-JSON body counts as a missing field.
fn parse_query(body: &[u8]) -> Result<String, ChatError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ChatError::MissingQuery)?;

    match value.get("query") {
        None => Err(ChatError::MissingQuery),
        Some(Value::String(query)) => Ok(query.clone()),
        Some(_) => Err(ChatError::InvalidQuery),
    }
}
