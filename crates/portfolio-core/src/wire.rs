//! JSON payloads exchanged between the terminal and the chat relay

use serde::{Deserialize, Serialize};

use crate::state::ChatMessage;

/// Body of a relay invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "chatHistory", default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Successful relay response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
}

/// Error relay response, sent with a non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatRole;

    #[test]
    fn request_uses_chat_history_field_name() {
        let request = ChatRequest {
            message: "and you?".to_string(),
            chat_history: vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["chatHistory"][1]["role"], "assistant");
        assert_eq!(value["message"], "and you?");
    }

    #[test]
    fn missing_history_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(request.chat_history.is_empty());

        let request: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","chatHistory":[{"role":"user","content":"yo"}]}"#,
        )
        .unwrap();
        assert_eq!(request.chat_history[0].role, ChatRole::User);
    }
}
