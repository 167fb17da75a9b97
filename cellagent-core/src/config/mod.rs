//! Configuration types for cellagent.
//!
//! All configurations are serde-deserializable with defaults for every
//! field, so partial files and environment overrides compose cleanly.

pub mod client;
pub mod server;
pub mod simulation;

pub use client::ClientConfig;
pub use server::ServerConfig;
pub use simulation::{DelayRange, SimulationConfig};
