//! Pauses between emitted events.
//!
//! The simulator never sleeps directly; it asks a [`Pacer`] to pause. The
//! server uses [`RandomPacer`] to make the narrated pipeline feel like real
//! work, tests use [`InstantPacer`] to run a whole workflow in microseconds.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use cellagent_core::config::{DelayRange, SimulationConfig};
use rand::Rng;

/// The points in a workflow where the simulator pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pause {
    /// After every progress tick
    ProgressTick,
    /// After every content chunk
    Chunk,
    /// After an agent completes
    BetweenAgents,
}

/// Delay strategy used by the simulator.
#[async_trait]
pub trait Pacer: Send + Sync + Debug {
    /// Suspend the caller for the pause appropriate to `pause`.
    async fn pause(&self, pause: Pause);
}

/// Sleeps on tokio timers for a random duration drawn from the configured ranges.
#[derive(Debug, Clone)]
pub struct RandomPacer {
    progress: DelayRange,
    chunk: DelayRange,
    between_agents: Duration,
}

impl RandomPacer {
    /// Build a pacer from simulation timing.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            progress: config.progress_delay,
            chunk: config.chunk_delay,
            between_agents: config.agent_gap(),
        }
    }

    /// Draw the duration of one pause.
    pub fn duration_for(&self, pause: Pause) -> Duration {
        let range = match pause {
            Pause::ProgressTick => self.progress,
            Pause::Chunk => self.chunk,
            Pause::BetweenAgents => return self.between_agents,
        };
        if range.min_ms >= range.max_ms {
            return range.min();
        }
        Duration::from_millis(rand::thread_rng().gen_range(range.min_ms..=range.max_ms))
    }
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn pause(&self, pause: Pause) {
        let duration = self.duration_for(pause);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, _pause: Pause) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_durations_stay_in_range() {
        let pacer = RandomPacer::default();
        for _ in 0..200 {
            let tick = pacer.duration_for(Pause::ProgressTick);
            assert!(tick >= Duration::from_millis(100) && tick <= Duration::from_millis(300));

            let chunk = pacer.duration_for(Pause::Chunk);
            assert!(chunk >= Duration::from_millis(50) && chunk <= Duration::from_millis(150));
        }
        assert_eq!(
            pacer.duration_for(Pause::BetweenAgents),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_fixed_ranges() {
        let config = SimulationConfig::default()
            .with_progress_delay(DelayRange::fixed(7))
            .with_chunk_delay(DelayRange::fixed(0));
        let pacer = RandomPacer::from_config(&config);
        assert_eq!(pacer.duration_for(Pause::ProgressTick), Duration::from_millis(7));
        assert!(pacer.duration_for(Pause::Chunk).is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_pacer_sleeps_on_tokio_time() {
        let pacer = RandomPacer::default();
        let started = tokio::time::Instant::now();
        pacer.pause(Pause::BetweenAgents).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
