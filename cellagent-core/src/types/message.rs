//! Client-side streaming message projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::AgentKind;

/// Identifier of one streaming message, e.g. `scrna-1b4e...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh id for a message produced by `kind`.
    pub fn for_agent(kind: AgentKind) -> Self {
        Self(format!("{kind}-{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accumulator for one agent's output on the client.
///
/// Created on `agent_start`, appended to by `agent_message` and
/// `agent_content_chunk`, finalized by `agent_complete` or by the consumer
/// closing the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingMessage {
    /// Unique message identifier
    pub id: MessageId,
    /// Display name of the producing agent
    pub agent: String,
    /// Content accumulated so far
    pub content: String,
    /// Whether more content may still arrive
    pub is_streaming: bool,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl StreamingMessage {
    /// Open a new, empty message for an agent.
    pub fn open(kind: AgentKind, agent_name: impl Into<String>) -> Self {
        Self {
            id: MessageId::for_agent(kind),
            agent: agent_name.into(),
            content: String::new(),
            is_streaming: true,
            timestamp: Utc::now(),
        }
    }

    /// Append a narrated status line, separated from earlier content by a blank line.
    pub fn push_paragraph(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push_str("\n\n");
        }
        self.content.push_str(text);
    }

    /// Append a raw content chunk.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.content.push_str(chunk);
    }

    /// Stop streaming; a non-empty `authoritative` text replaces the accumulated content.
    pub fn finalize(&mut self, authoritative: Option<&str>) {
        if let Some(text) = authoritative.filter(|t| !t.is_empty()) {
            self.content = text.to_string();
        }
        self.is_streaming = false;
    }
}
