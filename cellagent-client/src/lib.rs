//! # Cellagent Client
//!
//! Consumer side of the cellagent workflow stream: opens one stream per
//! user turn, decodes its `data: <json>` records and rebuilds one
//! [`StreamingMessage`] per agent as content arrives.
//!
//! - [`StreamClient`] drives the HTTP request and publishes state changes
//! - [`StreamState`] is the reducer that owns the message list
//! - [`WorkflowProgress`] is a per-agent status board fed by the same events
//!
//! ```rust,no_run
//! use cellagent_client::StreamClient;
//! use cellagent_core::config::ClientConfig;
//!
//! # async fn demo() -> cellagent_client::Result<()> {
//! let client = StreamClient::new(ClientConfig::default())?;
//! let mut updates = client.subscribe();
//! tokio::spawn(async move {
//!     while updates.changed().await.is_ok() {
//!         let state = updates.borrow_and_update();
//!         println!("{} messages", state.messages().len());
//!     }
//! });
//! client.start_stream("请过滤我的单细胞数据", Vec::new(), false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`StreamingMessage`]: cellagent_core::StreamingMessage

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod decoder;
pub mod error;
pub mod progress;
pub mod state;

pub use client::{StreamClient, StreamOutcome};
pub use decoder::LineDecoder;
pub use error::{ClientError, Result};
pub use progress::{AgentProgress, AgentStatus, WorkflowProgress, WorkflowStatus};
pub use state::{Session, StreamState};
