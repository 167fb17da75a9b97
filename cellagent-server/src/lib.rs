//! HTTP surface of cellagent.
//!
//! Exposes the simulated workflow as a server-sent event stream:
//!
//! - `POST /api/chat/stream` takes a [`ChatStreamRequest`] and streams
//!   `data: <json>` records until `workflow_complete` or `error`
//! - `GET /health` reports liveness
//!
//! ```rust,no_run
//! use cellagent_server::{router, AppState, settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = settings::load(None)?;
//!     let state = AppState::from_config(&config)?;
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! [`ChatStreamRequest`]: cellagent_core::ChatStreamRequest

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod routes;
pub mod settings;
pub mod state;

pub use routes::{router, STREAM_PATH};
pub use state::AppState;
