//! Shared application state.

use std::sync::Arc;

use cellagent_core::config::ServerConfig;
use cellagent_core::{AgentCatalog, Result};
use cellagent_workflow::WorkflowSimulator;
use tracing::info;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    simulator: WorkflowSimulator,
}

impl AppState {
    /// Wrap an existing simulator.
    pub fn new(simulator: WorkflowSimulator) -> Self {
        Self { simulator }
    }

    /// Build the state described by a server configuration.
    ///
    /// Loads the catalog file when one is configured, otherwise uses the
    /// built-in catalog, and pauses on real timers.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        config.simulation.validate()?;
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!("Using agent catalog {}", path.display());
                AgentCatalog::from_path(path)?
            }
            None => AgentCatalog::default(),
        };
        Ok(Self::new(WorkflowSimulator::with_random_pacing(
            Arc::new(catalog),
            config.simulation.clone(),
        )))
    }

    /// The workflow simulator.
    pub fn simulator(&self) -> &WorkflowSimulator {
        &self.simulator
    }
}
