//! Prelude module for convenient imports.
//!
//! ```rust
//! use cellagent_core::prelude::*;
//!
//! let request = ChatStreamRequest::new("请过滤我的单细胞数据");
//! assert!(request.files.is_empty());
//! ```

pub use crate::catalog::{AgentCatalog, AgentProfile, KeywordGroup, StatusTemplates};
pub use crate::config::{ClientConfig, DelayRange, ServerConfig, SimulationConfig};
pub use crate::error::{CellAgentError, Result};
pub use crate::sse;
pub use crate::types::{
    AgentDescriptor, AgentKind, ChatStreamRequest, FileMetadata, MessageId, MessageType,
    StreamingMessage, WorkflowEvent,
};
