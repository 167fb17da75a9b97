//! Workflow events exchanged between the producer and the consumer.
//!
//! Every record on the wire is one JSON object tagged by `type`:
//!
//! ```json
//! {"type":"agent_progress","agent":{"type":"scrna","name":"scRNA数据处理Agent"},"progress":35}
//! ```

use serde::{Deserialize, Serialize};

use super::agent::AgentDescriptor;

/// Classification carried by `agent_message` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Intermediate status narration
    Progress,
    /// Final result text
    Result,
    /// Failure narration
    Error,
}

/// One record of the workflow stream.
///
/// Within a workflow the producer guarantees a single total order: one
/// `AgentStart` precedes every other event of that agent, agents never
/// interleave, and `WorkflowComplete` is last unless `Error` preempts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// The pipeline that is about to run
    WorkflowStart {
        /// Agents in execution order
        agents: Vec<AgentDescriptor>,
    },

    /// An agent began executing
    AgentStart {
        /// The agent
        agent: AgentDescriptor,
        /// Zero-based position in the pipeline
        index: usize,
    },

    /// Progress tick for the running agent
    AgentProgress {
        /// The agent
        agent: AgentDescriptor,
        /// Percentage in `0..=100`
        progress: u8,
    },

    /// Narrated status line from the running agent
    AgentMessage {
        /// The agent
        agent: AgentDescriptor,
        /// Message text
        content: String,
        /// Message classification
        #[serde(rename = "messageType")]
        message_type: MessageType,
    },

    /// A slice of the agent's result text
    AgentContentChunk {
        /// The agent
        agent: AgentDescriptor,
        /// Chunk text, including its leading separator
        chunk: String,
        /// Always `false` on chunks; completion is signaled by `AgentComplete`
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },

    /// The agent finished; `content` is the authoritative full result
    AgentComplete {
        /// The agent
        agent: AgentDescriptor,
        /// Full result text; empty when the record omits it
        #[serde(default)]
        content: String,
    },

    /// Every agent has finished
    WorkflowComplete,

    /// The producer failed; the stream ends after this record
    Error {
        /// Human-readable message
        #[serde(default = "unknown_error_message")]
        message: String,
    },

    /// A record whose `type` this build does not know. Never produced.
    #[serde(other)]
    Unknown,
}

/// Message used for `error` records that arrive without one.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

fn unknown_error_message() -> String {
    UNKNOWN_ERROR_MESSAGE.to_string()
}

impl WorkflowEvent {
    /// The wire `type` tag of this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::WorkflowStart { .. } => "workflow_start",
            Self::AgentStart { .. } => "agent_start",
            Self::AgentProgress { .. } => "agent_progress",
            Self::AgentMessage { .. } => "agent_message",
            Self::AgentContentChunk { .. } => "agent_content_chunk",
            Self::AgentComplete { .. } => "agent_complete",
            Self::WorkflowComplete => "workflow_complete",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    /// The agent this event belongs to, if any.
    pub fn agent(&self) -> Option<&AgentDescriptor> {
        match self {
            Self::AgentStart { agent, .. }
            | Self::AgentProgress { agent, .. }
            | Self::AgentMessage { agent, .. }
            | Self::AgentContentChunk { agent, .. }
            | Self::AgentComplete { agent, .. } => Some(agent),
            _ => None,
        }
    }

    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::WorkflowComplete | Self::Error { .. })
    }
}
