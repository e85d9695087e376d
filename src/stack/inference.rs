use serde::{Deserialize, Serialize};

use super::content::InterleavedContent;
use super::{StackClient, StackError};

const CHAT_COMPLETION_PATH: &str = "/v1/inference/chat-completion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model_id: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    completion_message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: InterleavedContent,
    #[serde(default)]
    stop_reason: Option<String>,
}

impl StackClient {
    /// Non-streaming chat completion. Returns the text of the completion message.
    pub async fn chat_completion(
        &self,
        model_id: &str,
        messages: &[Message],
    ) -> Result<String, StackError> {
        let request = ChatCompletionRequest {
            model_id,
            messages,
            stream: false,
        };
        let response: ChatCompletionResponse =
            self.post_json(CHAT_COMPLETION_PATH, &request).await?;

        let message = response.completion_message;
        if let Some(reason) = &message.stop_reason {
            tracing::debug!("Completion stopped: {}", reason);
        }
        Ok(message.content.to_text())
    }
}
