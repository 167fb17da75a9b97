//! # Cellagent
//!
//! Simulated multi-agent analysis pipeline for a biomedical chat assistant,
//! streamed as server-sent events, plus the consumer that turns the stream
//! back into one message per agent.
//!
//! ## Quick Start
//!
//! ```rust
//! use cellagent::prelude::*;
//!
//! let catalog = AgentCatalog::default();
//! let agents = select_agents(&catalog, "请过滤我的单细胞数据");
//! assert_eq!(
//!     agents,
//!     vec![AgentKind::Scheduler, AgentKind::Scrna, AgentKind::Filter, AgentKind::Summary]
//! );
//! ```
//!
//! ## Architecture
//!
//! - **cellagent-core**: data model, wire events, SSE codec, catalog and configuration
//! - **cellagent-workflow**: agent selection and the timed event producer
//! - **cellagent-server**: axum endpoint streaming workflows (feature `server`)
//! - **cellagent-client**: reqwest consumer rebuilding messages (feature `client`)

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export all public APIs from sub-crates
#[cfg(feature = "client")]
pub use cellagent_client as client;
pub use cellagent_core as core;
#[cfg(feature = "server")]
pub use cellagent_server as server;
pub use cellagent_workflow as workflow;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and traits
/// from all cellagent crates.
pub mod prelude {
    pub use cellagent_core::prelude::*;

    pub use cellagent_workflow::{
        select_agents, split_into_chunks, EventSink, InstantPacer, Pacer, Pause, RandomPacer,
        WorkflowOutcome, WorkflowSimulator,
    };

    #[cfg(feature = "server")]
    pub use cellagent_server::{router, AppState};

    #[cfg(feature = "client")]
    pub use cellagent_client::{
        ClientError, StreamClient, StreamOutcome, StreamState, WorkflowProgress,
    };
}

/// Version information for the cellagent framework.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
