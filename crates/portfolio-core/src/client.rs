use reqwest::Client;
use tracing::{debug, warn};

use crate::error::RelayError;
use crate::wire::{ChatReply, ChatRequest, ErrorPayload};

pub const NO_RESPONSE: &str = "No response received.";

/// Calls the chat relay endpoint on behalf of a terminal session.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl RelayClient {
    pub fn new(endpoint: &str, token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            token: token.map(|t| t.to_string()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn complete(&self, request: &ChatRequest) -> Result<String, RelayError> {
        debug!(
            endpoint = %self.endpoint,
            history = request.chat_history.len(),
            "sending chat message to relay"
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(token) = &self.token {
            builder = builder
                .header("Authorization", format!("Bearer {}", token))
                .header("apikey", token);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorPayload>(&text)
                .map(|payload| payload.error)
                .unwrap_or_else(|_| format!("Relay error: {}", status));
            warn!(status, %message, "relay rejected chat message");
            return Err(RelayError::Rejected { status, message });
        }

        let reply: ChatReply = response.json().await?;
        if reply.content.trim().is_empty() {
            Ok(NO_RESPONSE.to_string())
        } else {
            Ok(reply.content)
        }
    }
}
