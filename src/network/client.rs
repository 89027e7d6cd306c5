use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::common::{ChatOutcome, ChatReply};
use crate::config::AppConfig;

use super::ChatBackend;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// HTTP client cho endpoint chat. Mỗi lượt đúng một request, không retry.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ChatError::Client)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ChatError> {
        Self::new(
            config.endpoint.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `{"message": text}` and parses the reply body.
    pub async fn try_send(&self, text: &str) -> Result<ChatReply, ChatError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice::<serde_json::Value>(&body)?;
        Ok(ChatReply::from_value(&value))
    }
}

impl ChatBackend for ChatClient {
    async fn send(&self, text: &str) -> ChatOutcome {
        match self.try_send(text).await {
            Ok(reply) => ChatOutcome::Reply(reply),
            Err(err) => {
                log::warn!("Error connecting to backend {}: {err}", self.endpoint);
                ChatOutcome::Failed
            }
        }
    }
}
