//! # Cellagent Core
//!
//! Shared building blocks for the cellagent streaming workflow simulator.
//!
//! This crate provides:
//!
//! - **Data model**: agent descriptors, streaming messages and chat requests
//! - **Wire events**: the [`WorkflowEvent`] discriminated union exchanged over SSE
//! - **SSE codec**: framing and line decoding for `data: <json>` records
//! - **Catalog**: the immutable [`AgentCatalog`] of names, keywords and canned results
//! - **Configuration**: type-safe configuration for the simulation, server and client
//! - **Error handling**: the crate-wide [`CellAgentError`] type
//!
//! ## Quick Start
//!
//! ```rust
//! use cellagent_core::prelude::*;
//!
//! let catalog = AgentCatalog::default();
//! let agent = catalog.descriptor(AgentKind::Scheduler).unwrap();
//! let frame = sse::encode_frame(&WorkflowEvent::AgentStart { agent, index: 0 }).unwrap();
//! assert!(frame.starts_with("data: "));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod prelude;

pub mod catalog;
pub mod config;
pub mod error;
pub mod sse;
pub mod types;

pub use catalog::{AgentCatalog, AgentProfile, KeywordGroup, StatusTemplates};
pub use error::{CellAgentError, Result};
pub use types::{
    AgentDescriptor, AgentKind, ChatStreamRequest, FileMetadata, MessageId, MessageType,
    StreamingMessage, WorkflowEvent, UNKNOWN_ERROR_MESSAGE,
};

/// Version information for the cellagent core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the cellagent core library.
pub const NAME: &str = env!("CARGO_PKG_NAME");
