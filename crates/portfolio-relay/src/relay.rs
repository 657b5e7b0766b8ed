use portfolio_core::{ChatMessage, RelayError};
use tracing::info;

use crate::config::RelayConfig;
use crate::prompt::system_prompt;
use crate::upstream::{UpstreamClient, UpstreamMessage};

/// Stateless broker between terminal sessions and the completion API.
///
/// Holds only immutable configuration and a pooled HTTP client, so one
/// instance is shared by every request.
pub struct ChatRelay {
    config: RelayConfig,
    system_prompt: String,
    upstream: UpstreamClient,
}

impl ChatRelay {
    pub fn new(config: RelayConfig) -> Self {
        let system_prompt = system_prompt(&config.profile);
        let upstream = UpstreamClient::new(&config.api_base);
        Self {
            config,
            system_prompt,
            upstream,
        }
    }

    /// System prompt, then the transcript in order, then the new message.
    pub fn build_messages(&self, message: &str, transcript: &[ChatMessage]) -> Vec<UpstreamMessage> {
        let mut messages = Vec::with_capacity(transcript.len() + 2);
        messages.push(UpstreamMessage::new("system", &self.system_prompt));
        for entry in transcript {
            messages.push(UpstreamMessage::new(entry.role.as_str(), &entry.content));
        }
        messages.push(UpstreamMessage::new("user", message));
        messages
    }

    pub async fn complete(&self, message: &str, transcript: &[ChatMessage]) -> Result<String, RelayError> {
        let api_key = self.config.api_key()?;
        let messages = self.build_messages(message, transcript);

        info!(
            model = %self.config.model,
            history = transcript.len(),
            "sending request to completion API"
        );
        let content = self.upstream
            .complete(api_key, &self.config.model, self.config.max_tokens, &messages)
            .await?;
        info!("completion API response received");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::Profile;

    #[test]
    fn messages_are_ordered_system_history_user() {
        let relay = ChatRelay::new(RelayConfig::new(None));
        let transcript = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];

        let messages = relay.build_messages("how are you", &transcript);
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages[1].content, "hi");
        assert_eq!(messages[3].content, "how are you");
    }

    #[test]
    fn configured_profile_drives_the_persona() {
        let profile = Profile {
            name: "Mira".to_string(),
            discord_server: "discord.gg/mira".to_string(),
            ..Profile::default()
        };
        let relay = ChatRelay::new(RelayConfig::new(None).with_profile(profile));

        let system = &relay.build_messages("hi", &[])[0].content;
        assert!(system.contains("Mira's personal portfolio"));
        assert!(system.contains("Discord server: discord.gg/mira"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let relay = ChatRelay::new(RelayConfig::new(None).with_api_base("http://127.0.0.1:1"));
        let err = relay.complete("hi", &[]).await.unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }
}
