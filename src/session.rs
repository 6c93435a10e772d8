use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{ChatContext, ToolResult};

/// One chat session. Owns the append-only history of tool results that
/// every subsequent tool call receives as context.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub language: String,
    pub history: Vec<ToolResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(language: &str) -> Session {
        Session {
            id: Uuid::new_v4().to_string(),
            language: language.to_string(),
            history: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Append one settled tool result
    pub fn record_result(&mut self, result: ToolResult) {
        self.history.push(result);
        self.updated_at = Utc::now();
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
        self.updated_at = Utc::now();
    }

    /// Snapshot the session into the read-only context handed to a
    /// dispatch. Later appends do not affect an in-flight batch.
    pub fn context(&self) -> ChatContext {
        ChatContext {
            previous_chats: self.history.clone(),
            language: self.language.clone(),
        }
    }
}
