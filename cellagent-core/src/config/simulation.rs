//! Configuration for the simulated workflow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CellAgentError, Result};

/// Inclusive range of milliseconds a randomized pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Lower bound in milliseconds
    pub min_ms: u64,
    /// Upper bound in milliseconds
    pub max_ms: u64,
}

impl DelayRange {
    /// Create a range.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that always yields `ms`.
    pub fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Lower bound as a duration.
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(CellAgentError::validation(
                field,
                format!("min_ms ({}) exceeds max_ms ({})", self.min_ms, self.max_ms),
            ));
        }
        Ok(())
    }
}

/// Timing and shape of one simulated workflow.
///
/// # Examples
///
/// ```rust
/// use cellagent_core::config::{DelayRange, SimulationConfig};
///
/// let fast = SimulationConfig::default()
///     .with_progress_delay(DelayRange::fixed(0))
///     .with_chunk_delay(DelayRange::fixed(0))
///     .with_agent_gap_ms(0);
/// assert!(fast.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of progress intervals; `progress_steps + 1` ticks are emitted
    pub progress_steps: u32,

    /// Chunk size budget in characters
    pub chunk_size: usize,

    /// Pause after each progress tick
    pub progress_delay: DelayRange,

    /// Pause after each content chunk
    pub chunk_delay: DelayRange,

    /// Pause between two agents, in milliseconds
    pub agent_gap_ms: u64,

    /// Capacity of the channel between the simulation task and the response body
    pub channel_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            progress_steps: 20,
            chunk_size: 50,
            progress_delay: DelayRange::new(100, 300),
            chunk_delay: DelayRange::new(50, 150),
            agent_gap_ms: 500,
            channel_capacity: 64,
        }
    }
}

impl SimulationConfig {
    /// Set the number of progress intervals.
    #[must_use]
    pub fn with_progress_steps(mut self, steps: u32) -> Self {
        self.progress_steps = steps;
        self
    }

    /// Set the chunk size budget.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the progress tick pause.
    #[must_use]
    pub fn with_progress_delay(mut self, delay: DelayRange) -> Self {
        self.progress_delay = delay;
        self
    }

    /// Set the chunk pause.
    #[must_use]
    pub fn with_chunk_delay(mut self, delay: DelayRange) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Set the pause between agents.
    #[must_use]
    pub fn with_agent_gap_ms(mut self, gap_ms: u64) -> Self {
        self.agent_gap_ms = gap_ms;
        self
    }

    /// Pause between agents as a duration.
    pub fn agent_gap(&self) -> Duration {
        Duration::from_millis(self.agent_gap_ms)
    }

    /// Steps after which the two narrated status messages are emitted.
    pub fn checkpoints(&self) -> (u32, u32) {
        let second = u64::from(self.progress_steps) * 2 / 3;
        (
            self.progress_steps / 3,
            u32::try_from(second).unwrap_or(self.progress_steps),
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.progress_steps == 0 {
            return Err(CellAgentError::validation(
                "progress_steps",
                "must be greater than zero",
            ));
        }
        if self.chunk_size == 0 {
            return Err(CellAgentError::validation(
                "chunk_size",
                "must be greater than zero",
            ));
        }
        if self.channel_capacity == 0 {
            return Err(CellAgentError::validation(
                "channel_capacity",
                "must be greater than zero",
            ));
        }
        self.progress_delay.validate("progress_delay")?;
        self.chunk_delay.validate("chunk_delay")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checkpoints() {
        assert_eq!(SimulationConfig::default().checkpoints(), (6, 13));
    }

    #[test]
    fn test_checkpoints_for_huge_step_counts() {
        let config = SimulationConfig::default().with_progress_steps(u32::MAX);
        assert_eq!(config.checkpoints(), (1_431_655_765, 2_863_311_530));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"chunk_size": 80}"#).unwrap();
        assert_eq!(config.chunk_size, 80);
        assert_eq!(config.progress_steps, 20);
        assert_eq!(config.agent_gap(), Duration::from_millis(500));
    }

    #[test]
    fn test_validation() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(SimulationConfig::default()
            .with_chunk_size(0)
            .validate()
            .is_err());
        assert!(SimulationConfig::default()
            .with_chunk_delay(DelayRange::new(20, 10))
            .validate()
            .is_err());
    }
}
