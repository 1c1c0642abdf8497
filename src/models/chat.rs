use serde::{ Serialize, Deserialize };
use serde_json::{ Map, Value };

use crate::error::RelayError;

pub const MESSAGES_NOT_A_LIST: &str = "Messages must be a list";
pub const INVALID_MESSAGE_FORMAT: &str = "Invalid message format";

/// One conversation turn. `role` and `content` must be present but their
/// values are forwarded as sent (string, content parts, null, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Value,
    pub content: Value,
    /// Any other keys the client sent (e.g. `name`), forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Value::String(role.into()),
            content: Value::String(content.into()),
            extra: Map::new(),
        }
    }

    fn from_object(mut obj: Map<String, Value>) -> Option<Self> {
        let role = obj.remove("role")?;
        let content = obj.remove("content")?;
        Some(Self { role, content, extra: obj })
    }
}

/// Inbound body of `POST /api/chat`. `messages` stays untyped until validated.
#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub messages: Value,
}

impl ChatRequest {
    /// Only a JSON object body carries `messages`; any other body shape is
    /// treated as if the field were absent.
    pub fn from_body(body: Value) -> Self {
        let messages = match body {
            Value::Object(mut obj) => obj.remove("messages").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Self { messages }
    }

    pub fn validate(self) -> Result<Vec<ChatMessage>, RelayError> {
        validate_messages(self.messages)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub fn validate_messages(messages: Value) -> Result<Vec<ChatMessage>, RelayError> {
    let items = match messages {
        Value::Array(items) => items,
        _ => return Err(RelayError::InvalidInput(MESSAGES_NOT_A_LIST.to_string())),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(obj) => ChatMessage::from_object(obj),
            _ => None,
        }
        .ok_or_else(|| RelayError::InvalidInput(INVALID_MESSAGE_FORMAT.to_string())))
        .collect()
}
