use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_STACK_HOST: &str = "172.21.137.132";
pub const DEFAULT_STACK_PORT: u16 = 8321;
pub const DEFAULT_VECTOR_DB_ID: &str = "pension_vector_db_002";
pub const DEFAULT_MODEL_ID: &str = "llama-31-8b-instruct-quantizedw4a16-150";
pub const DEFAULT_TOP_K: u32 = 3;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Deployment settings, read once at startup.
///
/// Field names double as the (upper-cased) environment variable names,
/// e.g. `LLAMA_STACK_HOST` or `RAG_TOP_K`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Host of the Llama Stack server
    pub llama_stack_host: String,
    /// Port of the Llama Stack server
    pub llama_stack_port: u16,
    /// Vector collection queried for context
    pub vector_db_id: String,
    /// Model used for chat completion
    pub llm_model_id: String,
    /// Maximum number of chunks requested per query
    pub rag_top_k: u32,
    /// Minimum relevance score a chunk needs to be returned
    pub rag_score_threshold: f64,
    /// Outbound HTTP timeout in seconds. Unset means requests never time out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llama_stack_host: DEFAULT_STACK_HOST.to_string(),
            llama_stack_port: DEFAULT_STACK_PORT,
            vector_db_id: DEFAULT_VECTOR_DB_ID.to_string(),
            llm_model_id: DEFAULT_MODEL_ID.to_string(),
            rag_top_k: DEFAULT_TOP_K,
            rag_score_threshold: DEFAULT_SCORE_THRESHOLD,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment on top of the defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_environment(Environment::default())
    }

    /// Environment values reach serde as strings; numeric fields are parsed
    /// there, identifiers are kept verbatim.
    pub fn from_environment(env: Environment) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("llama_stack_host", defaults.llama_stack_host)?
            .set_default("llama_stack_port", i64::from(defaults.llama_stack_port))?
            .set_default("vector_db_id", defaults.vector_db_id)?
            .set_default("llm_model_id", defaults.llm_model_id)?
            .set_default("rag_top_k", i64::from(defaults.rag_top_k))?
            .set_default("rag_score_threshold", defaults.rag_score_threshold)?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llama_stack_host.trim().is_empty() {
            return Err(SettingsError::Invalid("LLAMA_STACK_HOST must not be empty".into()));
        }
        if self.vector_db_id.trim().is_empty() {
            return Err(SettingsError::Invalid("VECTOR_DB_ID must not be empty".into()));
        }
        if self.llm_model_id.trim().is_empty() {
            return Err(SettingsError::Invalid("LLM_MODEL_ID must not be empty".into()));
        }
        if self.rag_top_k == 0 {
            return Err(SettingsError::Invalid("RAG_TOP_K must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.rag_score_threshold) {
            return Err(SettingsError::Invalid(format!(
                "RAG_SCORE_THRESHOLD must be within [0, 1], got {}",
                self.rag_score_threshold
            )));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.llama_stack_host, self.llama_stack_port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
