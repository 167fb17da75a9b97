//! Workflow event producer for cellagent.
//!
//! Given a free-text request this crate decides which simulated agents run
//! and narrates their execution as an ordered stream of [`WorkflowEvent`]s:
//!
//! - [`select_agents`] maps a request to a pipeline
//! - [`split_into_chunks`] slices canned results without breaking words
//! - [`Pacer`] abstracts the pauses between events
//! - [`EventSink`] receives the events
//! - [`WorkflowSimulator`] drives the whole thing
//!
//! ```rust
//! use cellagent_workflow::{select_agents, AgentCatalog, AgentKind};
//!
//! let pipeline = select_agents(&AgentCatalog::default(), "请过滤我的单细胞数据");
//! assert_eq!(
//!     pipeline,
//!     vec![AgentKind::Scheduler, AgentKind::Scrna, AgentKind::Filter, AgentKind::Summary]
//! );
//! ```
//!
//! [`WorkflowEvent`]: cellagent_core::WorkflowEvent

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chunking;
pub mod pacing;
pub mod selection;
pub mod simulator;
pub mod sink;

pub use chunking::split_into_chunks;
pub use pacing::{InstantPacer, Pacer, Pause, RandomPacer};
pub use selection::select_agents;
pub use simulator::{WorkflowOutcome, WorkflowSimulator, GENERIC_FAILURE_MESSAGE};
pub use sink::EventSink;

pub use cellagent_core::{AgentCatalog, AgentKind, CellAgentError, Result, WorkflowEvent};
