//! Language model capability interface and HTTP implementation.
//!
//! The query rewriter and answer composer both delegate to a [`ChatModel`].
//! Tests substitute deterministic doubles; production uses an
//! OpenAI-compatible `/chat/completions` endpoint (Groq by default).
//!
//! As with embeddings there are no retries: a timeout surfaces as
//! [`Error::Timeout`] and every other failure as [`Error::Generation`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Message role in a chat completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role/content pair sent to the language model.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Capability interface for chat completion.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generation model identifier (e.g. `"gemma2-9b-it"`).
    fn model_name(&self) -> &str;

    /// Send an ordered message sequence and return the model's reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Chat client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpChatModel {
    model: String,
    url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl HttpChatModel {
    pub fn new(provider: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            model: provider.chat_model.clone(),
            url: format!(
                "{}/chat/completions",
                provider.api_base.trim_end_matches('/')
            ),
            api_key: provider.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("chat completion request: {}", e))
                } else {
                    Error::Generation(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("malformed completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Generation("completion response had no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_messages_serialize_with_lowercase_roles() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        let sys = serde_json::to_value(ChatMessage::system("s")).unwrap();
        assert_eq!(sys["role"], "system");
        let asst = serde_json::to_value(ChatMessage::assistant("a")).unwrap();
        assert_eq!(asst["role"], "assistant");
    }
}
