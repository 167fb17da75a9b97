//! Per-workflow status board.
//!
//! Tracks which agents were announced, which one is running, how far it
//! got and how each one ended. Fed by the same events as the message list.

use chrono::{DateTime, Utc};
use cellagent_core::{AgentDescriptor, AgentKind, WorkflowEvent};

/// Lifecycle of one agent as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    /// Announced but not started
    Idle,
    /// Started and not yet complete
    Running,
    /// Completed
    Completed,
    /// The workflow failed while this agent was running
    Error,
}

/// Lifecycle of the whole workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    /// No event received yet
    #[default]
    Pending,
    /// `workflow_start` received
    Running,
    /// `workflow_complete` received
    Completed,
    /// `error` received
    Error,
}

/// Status of one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProgress {
    /// The agent
    pub agent: AgentDescriptor,
    /// Current status
    pub status: AgentStatus,
    /// Last reported progress percentage
    pub progress: u8,
    /// When `agent_start` arrived
    pub started_at: Option<DateTime<Utc>>,
    /// When the agent completed or failed
    pub finished_at: Option<DateTime<Utc>>,
    /// Failure message, if the workflow failed during this agent
    pub error: Option<String>,
}

impl AgentProgress {
    fn idle(agent: AgentDescriptor) -> Self {
        Self {
            agent,
            status: AgentStatus::Idle,
            progress: 0,
            started_at: None,
            finished_at: None,
            error: None,
        }
    }
}

/// Status board of one workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowProgress {
    status: WorkflowStatus,
    agents: Vec<AgentProgress>,
    current: Option<usize>,
    error: Option<String>,
}

impl WorkflowProgress {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Workflow status.
    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Agents in pipeline order.
    pub fn agents(&self) -> &[AgentProgress] {
        &self.agents
    }

    /// The running agent, if any.
    pub fn current_agent(&self) -> Option<&AgentProgress> {
        self.current.and_then(|i| self.agents.get(i))
    }

    /// Look up an agent by kind.
    pub fn agent(&self, kind: AgentKind) -> Option<&AgentProgress> {
        self.agents.iter().find(|a| a.agent.kind == kind)
    }

    /// Failure message of the workflow.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mean progress over all announced agents.
    pub fn overall_progress(&self) -> u8 {
        if self.agents.is_empty() {
            return 0;
        }
        let total: usize = self.agents.iter().map(|a| usize::from(a.progress)).sum();
        u8::try_from(total / self.agents.len()).unwrap_or(100)
    }

    /// Update the board from one event.
    pub fn apply(&mut self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::WorkflowStart { agents } => {
                self.agents = agents.iter().cloned().map(AgentProgress::idle).collect();
                self.current = None;
                self.error = None;
                self.status = WorkflowStatus::Running;
            }
            WorkflowEvent::AgentStart { agent, index } => {
                let slot = match self.agents.get(*index) {
                    Some(entry) if entry.agent.kind == agent.kind => *index,
                    _ => {
                        // Start without an announcement; track it anyway.
                        self.agents.push(AgentProgress::idle(agent.clone()));
                        self.agents.len() - 1
                    }
                };
                let entry = &mut self.agents[slot];
                entry.status = AgentStatus::Running;
                entry.started_at = Some(Utc::now());
                self.current = Some(slot);
                if self.status == WorkflowStatus::Pending {
                    self.status = WorkflowStatus::Running;
                }
            }
            WorkflowEvent::AgentProgress { agent, progress } => {
                if let Some(entry) = self.running_entry(agent.kind) {
                    entry.progress = (*progress).min(100);
                }
            }
            WorkflowEvent::AgentComplete { agent, .. } => {
                if let Some(entry) = self.running_entry(agent.kind) {
                    entry.status = AgentStatus::Completed;
                    entry.progress = 100;
                    entry.finished_at = Some(Utc::now());
                    self.current = None;
                }
            }
            WorkflowEvent::WorkflowComplete => {
                self.status = WorkflowStatus::Completed;
                self.current = None;
            }
            WorkflowEvent::Error { message } => {
                if let Some(i) = self.current.take() {
                    let entry = &mut self.agents[i];
                    entry.status = AgentStatus::Error;
                    entry.error = Some(message.clone());
                    entry.finished_at = Some(Utc::now());
                }
                self.error = Some(message.clone());
                self.status = WorkflowStatus::Error;
            }
            WorkflowEvent::AgentMessage { .. }
            | WorkflowEvent::AgentContentChunk { .. }
            | WorkflowEvent::Unknown => {}
        }
    }

    fn running_entry(&mut self, kind: AgentKind) -> Option<&mut AgentProgress> {
        self.current
            .and_then(|i| self.agents.get_mut(i))
            .filter(|entry| entry.agent.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn agent(kind: AgentKind) -> AgentDescriptor {
        AgentDescriptor::new(kind, kind.to_string())
    }

    fn started_board() -> WorkflowProgress {
        let mut board = WorkflowProgress::new();
        board.apply(&WorkflowEvent::WorkflowStart {
            agents: vec![agent(AgentKind::Scheduler), agent(AgentKind::Summary)],
        });
        board
    }

    #[test]
    fn test_announced_agents_start_idle() {
        let board = started_board();
        assert_eq!(board.status(), WorkflowStatus::Running);
        assert!(board.agents().iter().all(|a| a.status == AgentStatus::Idle));
        assert!(board.current_agent().is_none());
    }

    #[test]
    fn test_agent_lifecycle() {
        let mut board = started_board();
        board.apply(&WorkflowEvent::AgentStart {
            agent: agent(AgentKind::Scheduler),
            index: 0,
        });
        board.apply(&WorkflowEvent::AgentProgress {
            agent: agent(AgentKind::Scheduler),
            progress: 40,
        });

        let current = board.current_agent().unwrap();
        assert_eq!(current.status, AgentStatus::Running);
        assert_eq!(current.progress, 40);
        assert_eq!(board.overall_progress(), 20);

        board.apply(&WorkflowEvent::AgentComplete {
            agent: agent(AgentKind::Scheduler),
            content: "done".to_string(),
        });
        let scheduler = board.agent(AgentKind::Scheduler).unwrap();
        assert_eq!(scheduler.status, AgentStatus::Completed);
        assert_eq!(scheduler.progress, 100);
        assert!(scheduler.finished_at.is_some());
        assert!(board.current_agent().is_none());

        board.apply(&WorkflowEvent::WorkflowComplete);
        assert_eq!(board.status(), WorkflowStatus::Completed);
    }

    #[test]
    fn test_progress_for_another_agent_is_ignored() {
        let mut board = started_board();
        board.apply(&WorkflowEvent::AgentStart {
            agent: agent(AgentKind::Scheduler),
            index: 0,
        });
        board.apply(&WorkflowEvent::AgentProgress {
            agent: agent(AgentKind::Summary),
            progress: 90,
        });
        assert_eq!(board.agent(AgentKind::Summary).unwrap().progress, 0);
        assert_eq!(board.agent(AgentKind::Scheduler).unwrap().progress, 0);
    }

    #[test]
    fn test_error_marks_running_agent() {
        let mut board = started_board();
        board.apply(&WorkflowEvent::AgentStart {
            agent: agent(AgentKind::Scheduler),
            index: 0,
        });
        board.apply(&WorkflowEvent::Error {
            message: "Stream processing failed".to_string(),
        });

        let scheduler = board.agent(AgentKind::Scheduler).unwrap();
        assert_eq!(scheduler.status, AgentStatus::Error);
        assert_eq!(scheduler.error.as_deref(), Some("Stream processing failed"));
        assert_eq!(board.status(), WorkflowStatus::Error);
        assert_eq!(board.error(), Some("Stream processing failed"));
    }

    #[test]
    fn test_unannounced_start_is_tracked() {
        let mut board = WorkflowProgress::new();
        board.apply(&WorkflowEvent::AgentStart {
            agent: agent(AgentKind::Filter),
            index: 3,
        });
        assert_eq!(board.agents().len(), 1);
        assert_eq!(board.status(), WorkflowStatus::Running);
        assert_eq!(
            board.current_agent().map(|a| a.agent.kind),
            Some(AgentKind::Filter)
        );
    }
}
