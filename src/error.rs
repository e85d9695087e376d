use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Failure of a `/chat` request.
///
/// Server-side kinds display as the bare underlying message, which is what
/// the caller receives in the `error` field.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Missing 'query' field")]
    MissingQuery,

    #[error("'query' must be a string")]
    InvalidQuery,

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Retrieval(String),

    #[error("{0}")]
    Generation(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::MissingQuery | ChatError::InvalidQuery => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ChatError::MissingQuery | ChatError::InvalidQuery => "invalid_request",
            ChatError::Configuration(_) => "configuration_failed",
            ChatError::Retrieval(_) => "retrieval_failed",
            ChatError::Generation(_) => "generation_failed",
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
