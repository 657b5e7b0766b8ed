use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

use portfolio_core::RelayError;

pub const NO_RESPONSE: &str = "No response received.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamMessage {
    pub role: String,
    pub content: String,
}

impl UpstreamMessage {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [UpstreamMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    api_base: String,
}

impl UpstreamClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.to_string(),
        }
    }

    pub async fn complete(
        &self,
        api_key: &str,
        model: &str,
        max_tokens: u32,
        messages: &[UpstreamMessage],
    ) -> Result<String, RelayError> {
        let request = CompletionRequest {
            model,
            messages,
            max_tokens,
        };

        let response = self.client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            error!(status, body = %text, "completion API error");
            return Err(RelayError::Upstream { status });
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion.choices.into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
