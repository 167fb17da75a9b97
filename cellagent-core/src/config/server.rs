//! Configuration for the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::simulation::SimulationConfig;
use crate::{CellAgentError, Result};

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Optional agent catalog file (TOML or JSON)
    pub catalog_path: Option<PathBuf>,

    /// Simulation timing
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            catalog_path: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CellAgentError::configuration(format!("invalid bind address: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.simulation.validate()
    }
}
