//! Structured email conversation produced by the Structure stage

use super::null_as_default;
use crate::schema::{Field, FieldType, Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

/// A single email within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub sender: String,
    pub timestamp: String,
    pub recipient: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl ConversationMessage {
    pub fn schema() -> Schema {
        Schema::new("Email")
            .describe("A single email message")
            .field(
                Field::required("sender", FieldType::String)
                    .describe("Email address of the sender"),
            )
            .field(
                Field::required("timestamp", FieldType::String)
                    .describe("Date and time of the email as written in the thread"),
            )
            .field(
                Field::required("recipient", FieldType::String)
                    .describe("Email address of the primary recipient"),
            )
            .field(
                Field::optional("cc", FieldType::array_of(FieldType::String))
                    .describe("Email addresses in CC"),
            )
            .field(Field::required("subject", FieldType::String))
            .field(Field::required("body", FieldType::String).describe("Message body text"))
    }
}

/// An email thread, oldest message first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationThread {
    pub email_conversations: Vec<ConversationMessage>,
}

impl ConversationThread {
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.email_conversations
    }

    pub fn is_empty(&self) -> bool {
        self.email_conversations.is_empty()
    }

    /// Unique, non-empty addresses in order of first appearance
    /// (sender, recipient, then cc of each message).
    pub fn participants(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for message in &self.email_conversations {
            let addresses = [&message.sender, &message.recipient]
                .into_iter()
                .chain(message.cc.iter());
            for address in addresses {
                let address = address.trim();
                if !address.is_empty() && !seen.iter().any(|s| s == address) {
                    seen.push(address.to_string());
                }
            }
        }
        seen
    }
}

impl StructuredOutput for ConversationThread {
    fn schema() -> Schema {
        Schema::new("EmailConversation")
            .describe("Chronologically ordered email thread, oldest message first")
            .field(Field::required(
                "email_conversations",
                FieldType::array_of(FieldType::Object(ConversationMessage::schema())),
            ))
    }
}
