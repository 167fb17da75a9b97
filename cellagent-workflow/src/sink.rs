//! Destinations for emitted workflow events.

use async_trait::async_trait;
use cellagent_core::{CellAgentError, Result, WorkflowEvent};
use tokio::sync::mpsc;

/// Receives the events of one workflow, in order.
#[async_trait]
pub trait EventSink: Send {
    /// Deliver one event. Fails with [`CellAgentError::SinkClosed`] once
    /// nobody is listening any more.
    async fn emit(&mut self, event: WorkflowEvent) -> Result<()>;
}

#[async_trait]
impl EventSink for mpsc::Sender<WorkflowEvent> {
    async fn emit(&mut self, event: WorkflowEvent) -> Result<()> {
        self.send(event).await.map_err(|_| CellAgentError::SinkClosed)
    }
}

#[async_trait]
impl EventSink for Vec<WorkflowEvent> {
    async fn emit(&mut self, event: WorkflowEvent) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closed_channel_reports_sink_closed() {
        let (mut tx, rx) = mpsc::channel(1);
        drop(rx);
        let err = tx.emit(WorkflowEvent::WorkflowComplete).await.unwrap_err();
        assert!(err.is_disconnect());
    }

    #[tokio::test]
    async fn test_vec_sink_collects_in_order() {
        let mut events = Vec::new();
        events.emit(WorkflowEvent::WorkflowComplete).await.unwrap();
        events
            .emit(WorkflowEvent::Error {
                message: "late".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], WorkflowEvent::WorkflowComplete);
    }
}
