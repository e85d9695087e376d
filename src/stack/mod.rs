pub mod content;
pub mod inference;
pub mod vector_io;

use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("invalid Llama Stack URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Llama Stack request failed: {status} - {body}")]
    Status { status: StatusCode, body: String },
}

/// HTTP client for the Llama Stack REST API.
#[derive(Debug, Clone)]
pub struct StackClient {
    http: Client,
    base_url: String,
}

impl StackClient {
    pub fn connect(base_url: &str, timeout: Option<Duration>) -> Result<Self, StackError> {
        let url = Url::parse(base_url).map_err(|e| StackError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.host_str().is_none() {
            return Err(StackError::InvalidUrl {
                url: base_url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(StackError::Client)?;

        Ok(Self {
            http,
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, StackError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StackError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Process-wide client handle, constructed on first use.
///
/// A failed construction leaves the cell empty so the next caller retries.
/// Once built, the handle is returned as-is; it is never probed or rebuilt.
#[derive(Debug)]
pub struct LazyStackClient {
    base_url: String,
    timeout: Option<Duration>,
    cell: OnceCell<StackClient>,
}

impl LazyStackClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&StackClient, StackError> {
        self.cell.get_or_try_init(|| {
            match StackClient::connect(&self.base_url, self.timeout) {
                Ok(client) => {
                    tracing::info!("Connected to Llama Stack at {}", client.base_url());
                    Ok(client)
                }
                Err(e) => {
                    tracing::error!("Llama Stack client construction failed: {}", e);
                    Err(e)
                }
            }
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
