//! Core data types for cellagent.
//!
//! The wire-level [`WorkflowEvent`] union, the agent descriptors it carries,
//! the client-side [`StreamingMessage`] projection and the chat request body.

pub mod agent;
pub mod event;
pub mod message;
pub mod request;

pub use agent::{AgentDescriptor, AgentKind};
pub use event::{MessageType, WorkflowEvent, UNKNOWN_ERROR_MESSAGE};
pub use message::{MessageId, StreamingMessage};
pub use request::{ChatStreamRequest, FileMetadata};
