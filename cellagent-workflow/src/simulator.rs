//! The workflow simulation driver.
//!
//! For every selected agent the simulator emits `agent_start`, a run of
//! progress ticks with two narrated status messages, the canned result in
//! word-respecting chunks and finally `agent_complete`. Agents run strictly
//! one after another.

use std::sync::Arc;

use cellagent_core::config::SimulationConfig;
use cellagent_core::{
    AgentCatalog, AgentDescriptor, CellAgentError, MessageType, Result, WorkflowEvent,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::chunking::split_into_chunks;
use crate::pacing::{Pacer, Pause, RandomPacer};
use crate::selection::select_agents;
use crate::sink::EventSink;

/// Message carried by the `error` event when the simulation fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Stream processing failed";

/// How a workflow run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Every agent ran and `workflow_complete` was emitted
    Completed,
    /// The simulation failed and a single `error` event was emitted
    Failed(String),
    /// The sink closed; the run stopped early
    Disconnected,
}

/// Drives simulated workflows.
///
/// Cloning is cheap; the catalog and pacer are shared.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use cellagent_workflow::{AgentCatalog, InstantPacer, WorkflowSimulator};
/// use cellagent_core::config::SimulationConfig;
///
/// let simulator = WorkflowSimulator::new(
///     Arc::new(AgentCatalog::default()),
///     SimulationConfig::default(),
///     Arc::new(InstantPacer),
/// );
/// assert_eq!(simulator.config().progress_steps, 20);
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowSimulator {
    catalog: Arc<AgentCatalog>,
    config: SimulationConfig,
    pacer: Arc<dyn Pacer>,
}

impl WorkflowSimulator {
    /// Create a simulator.
    pub fn new(catalog: Arc<AgentCatalog>, config: SimulationConfig, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            catalog,
            config,
            pacer,
        }
    }

    /// Create a simulator that pauses on real timers as configured.
    pub fn with_random_pacing(catalog: Arc<AgentCatalog>, config: SimulationConfig) -> Self {
        let pacer = Arc::new(RandomPacer::from_config(&config));
        Self::new(catalog, config, pacer)
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &AgentCatalog {
        &self.catalog
    }

    /// The simulation configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run one workflow for `message`, emitting every event into `sink`.
    ///
    /// Failures inside the simulation are converted into a single `error`
    /// event. A closed sink stops the run without further events.
    pub async fn run<S>(&self, message: &str, sink: &mut S) -> WorkflowOutcome
    where
        S: EventSink + ?Sized,
    {
        match self.drive(message, sink).await {
            Ok(()) => WorkflowOutcome::Completed,
            Err(e) if e.is_disconnect() => {
                debug!("Event sink closed, stopping workflow");
                WorkflowOutcome::Disconnected
            }
            Err(e) => {
                warn!("Workflow failed ({}): {}", e.category(), e);
                let error = WorkflowEvent::Error {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                };
                if sink.emit(error).await.is_err() {
                    return WorkflowOutcome::Disconnected;
                }
                WorkflowOutcome::Failed(e.to_string())
            }
        }
    }

    /// Run a workflow on a background task and return its events as a stream.
    ///
    /// The stream ends after `workflow_complete` or `error`. Dropping the
    /// stream stops the background task at its next emit.
    pub fn stream(&self, message: impl Into<String>) -> ReceiverStream<WorkflowEvent> {
        let (mut tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let simulator = self.clone();
        let message = message.into();
        let span = tracing::info_span!("workflow", id = %Uuid::new_v4());

        tokio::spawn(
            async move {
                let outcome = simulator.run(&message, &mut tx).await;
                info!("Workflow finished: {:?}", outcome);
            }
            .instrument(span),
        );

        ReceiverStream::new(rx)
    }

    async fn drive<S>(&self, message: &str, sink: &mut S) -> Result<()>
    where
        S: EventSink + ?Sized,
    {
        let agents = select_agents(&self.catalog, message)
            .into_iter()
            .map(|kind| self.catalog.descriptor(kind))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Starting workflow with agents: {:?}",
            agents.iter().map(|a| a.kind).collect::<Vec<_>>()
        );
        sink.emit(WorkflowEvent::WorkflowStart {
            agents: agents.clone(),
        })
        .await?;

        for (index, agent) in agents.into_iter().enumerate() {
            self.run_agent(index, agent, sink).await?;
            self.pacer.pause(Pause::BetweenAgents).await;
        }

        sink.emit(WorkflowEvent::WorkflowComplete).await
    }

    async fn run_agent<S>(&self, index: usize, agent: AgentDescriptor, sink: &mut S) -> Result<()>
    where
        S: EventSink + ?Sized,
    {
        debug!("Agent {} ({}) started", agent.name, agent.kind);
        sink.emit(WorkflowEvent::AgentStart {
            agent: agent.clone(),
            index,
        })
        .await?;

        let steps = self.config.progress_steps;
        let (first, second) = self.config.checkpoints();
        let status = &self.catalog.status;

        for step in 0..=steps {
            let progress = progress_at(step, steps)?;
            sink.emit(WorkflowEvent::AgentProgress {
                agent: agent.clone(),
                progress,
            })
            .await?;

            let narration = if step == first {
                Some(status.render_started(&agent.name, progress))
            } else if step == second {
                Some(status.render_processing(&agent.name, progress))
            } else {
                None
            };
            if let Some(content) = narration {
                sink.emit(WorkflowEvent::AgentMessage {
                    agent: agent.clone(),
                    content,
                    message_type: MessageType::Progress,
                })
                .await?;
            }

            self.pacer.pause(Pause::ProgressTick).await;
        }

        let result = self.catalog.result_text(agent.kind)?;
        let chunks = split_into_chunks(result, self.config.chunk_size);
        debug!("Agent {} streaming {} chunks", agent.kind, chunks.len());
        for chunk in chunks {
            sink.emit(WorkflowEvent::AgentContentChunk {
                agent: agent.clone(),
                chunk,
                is_complete: false,
            })
            .await?;
            self.pacer.pause(Pause::Chunk).await;
        }

        sink.emit(WorkflowEvent::AgentComplete {
            agent,
            content: result.to_string(),
        })
        .await
    }
}

/// Percentage reached after `step` of `steps`, rounded half up.
fn progress_at(step: u32, steps: u32) -> Result<u8> {
    if steps == 0 {
        return Err(CellAgentError::workflow("progress_steps must be greater than zero"));
    }
    let percent = (u64::from(step) * 200 + u64::from(steps)) / (u64::from(steps) * 2);
    u8::try_from(percent.min(100))
        .map_err(|_| CellAgentError::workflow(format!("progress out of range: {percent}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::InstantPacer;
    use async_trait::async_trait;
    use cellagent_core::AgentKind;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingPacer {
        pauses: Mutex<Vec<Pause>>,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&self, pause: Pause) {
            self.pauses.lock().unwrap().push(pause);
        }
    }

    fn simulator(catalog: AgentCatalog) -> WorkflowSimulator {
        WorkflowSimulator::new(
            Arc::new(catalog),
            SimulationConfig::default(),
            Arc::new(InstantPacer),
        )
    }

    #[test]
    fn test_progress_interpolation() {
        let values: Vec<u8> = (0..=20).map(|s| progress_at(s, 20).unwrap()).collect();
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&100));
        assert_eq!(values[13], 65);
        assert_eq!(progress_at(1, 3).unwrap(), 33);
        assert_eq!(progress_at(2, 3).unwrap(), 67);
        assert!(progress_at(0, 0).is_err());
    }

    #[tokio::test]
    async fn test_minimal_workflow_event_order() {
        let mut events = Vec::new();
        let outcome = simulator(AgentCatalog::default())
            .run("hello", &mut events)
            .await;
        assert_eq!(outcome, WorkflowOutcome::Completed);

        let types: Vec<&str> = events.iter().map(WorkflowEvent::event_type).collect();
        assert_eq!(types.first(), Some(&"workflow_start"));
        assert_eq!(types.last(), Some(&"workflow_complete"));
        assert_eq!(types.iter().filter(|t| **t == "agent_start").count(), 2);
        assert_eq!(types.iter().filter(|t| **t == "agent_complete").count(), 2);
        assert_eq!(types.iter().filter(|t| **t == "agent_message").count(), 4);
    }

    #[tokio::test]
    async fn test_narration_follows_checkpoint_ticks() {
        let mut events = Vec::new();
        simulator(AgentCatalog::default())
            .run("hello", &mut events)
            .await;

        let narrated: Vec<(u8, String)> = events
            .windows(2)
            .filter_map(|pair| match pair {
                [
                    WorkflowEvent::AgentProgress { progress, .. },
                    WorkflowEvent::AgentMessage { content, .. },
                ] => Some((*progress, content.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(
            narrated[..2].to_vec(),
            vec![
                (30, "调度Agent开始分析数据...".to_string()),
                (65, "调度Agent正在处理核心逻辑... (65%)".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pause_schedule() {
        let pacer = Arc::new(RecordingPacer::default());
        let simulator = WorkflowSimulator::new(
            Arc::new(AgentCatalog::default()),
            SimulationConfig::default(),
            pacer.clone(),
        );
        let mut events = Vec::new();
        simulator.run("hello", &mut events).await;

        let chunk_events = events
            .iter()
            .filter(|e| matches!(e, WorkflowEvent::AgentContentChunk { .. }))
            .count();
        let pauses = pacer.pauses.lock().unwrap();
        let count = |kind: Pause| pauses.iter().filter(|p| **p == kind).count();
        assert_eq!(count(Pause::ProgressTick), 42);
        assert_eq!(count(Pause::Chunk), chunk_events);
        assert_eq!(count(Pause::BetweenAgents), 2);
    }

    /// Accepts every event except the `fail_at`-th, which fails once.
    struct FlakySink {
        events: Vec<WorkflowEvent>,
        fail_at: usize,
        attempts: usize,
    }

    #[async_trait]
    impl EventSink for FlakySink {
        async fn emit(&mut self, event: WorkflowEvent) -> Result<()> {
            self.attempts += 1;
            if self.attempts == self.fail_at {
                return Err(CellAgentError::workflow("encoder exploded"));
            }
            self.events.push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_profile_becomes_single_error_event() {
        let mut catalog = AgentCatalog::default();
        catalog.agents.retain(|p| p.kind != AgentKind::Filter);

        let mut events = Vec::new();
        let outcome = simulator(catalog).run("过滤", &mut events).await;

        assert!(matches!(outcome, WorkflowOutcome::Failed(_)));
        assert_eq!(
            events,
            vec![WorkflowEvent::Error {
                message: GENERIC_FAILURE_MESSAGE.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_mid_workflow_failure_ends_with_error() {
        let mut sink = FlakySink {
            events: Vec::new(),
            fail_at: 10,
            attempts: 0,
        };
        let outcome = simulator(AgentCatalog::default())
            .run("hello", &mut sink)
            .await;

        assert!(matches!(outcome, WorkflowOutcome::Failed(_)));
        assert_eq!(sink.events.len(), 10);
        assert!(matches!(
            sink.events.last(),
            Some(WorkflowEvent::Error { .. })
        ));
        assert!(!sink.events.contains(&WorkflowEvent::WorkflowComplete));
    }

    #[tokio::test]
    async fn test_closed_sink_stops_the_run() {
        let (mut tx, rx) = mpsc::channel(4);
        drop(rx);
        let outcome = simulator(AgentCatalog::default())
            .run("hello", &mut tx)
            .await;
        assert_eq!(outcome, WorkflowOutcome::Disconnected);
    }
}
