//! Consumer-side projection of a workflow stream.
//!
//! [`StreamState`] is a plain reducer: every mutation goes through one of its
//! methods, each of which reports whether anything changed so it can be
//! driven through `watch::Sender::send_if_modified`. Records belonging to a
//! stream that was stopped or superseded are recognised by their
//! [`Session`] and ignored.

use cellagent_core::{MessageId, StreamingMessage, WorkflowEvent};

use crate::progress::WorkflowProgress;

/// Token identifying one `start_stream` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session(u64);

/// Message list and streaming status of one conversation.
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    messages: Vec<StreamingMessage>,
    current: Option<MessageId>,
    is_streaming: bool,
    error: Option<String>,
    dropped_records: usize,
    workflow: WorkflowProgress,
    session: u64,
}

impl StreamState {
    /// An idle, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> &[StreamingMessage] {
        &self.messages
    }

    /// The message still receiving content, if any.
    pub fn current_message(&self) -> Option<&StreamingMessage> {
        let id = self.current.as_ref()?;
        self.messages.iter().find(|m| &m.id == id)
    }

    /// Whether a stream is being read.
    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    /// Last error reported by the producer or the transport.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records dropped because they could not be decoded.
    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    /// Status board of the current workflow.
    pub fn workflow(&self) -> &WorkflowProgress {
        &self.workflow
    }

    /// Whether `session` is the stream currently being read.
    pub fn is_active(&self, session: Session) -> bool {
        self.is_streaming && self.session == session.0
    }

    /// Start a new stream.
    ///
    /// Returns `None` while another stream is active. Otherwise resets the
    /// messages, error and workflow board and returns the new session.
    pub fn begin(&mut self) -> Option<Session> {
        if self.is_streaming {
            return None;
        }
        self.session += 1;
        self.messages.clear();
        self.current = None;
        self.error = None;
        self.dropped_records = 0;
        self.workflow = WorkflowProgress::new();
        self.is_streaming = true;
        Some(Session(self.session))
    }

    /// Apply one decoded event.
    pub fn dispatch(&mut self, session: Session, event: &WorkflowEvent) -> bool {
        if !self.is_active(session) {
            return false;
        }
        self.workflow.apply(event);

        match event {
            WorkflowEvent::AgentStart { agent, .. } => {
                // A start while another message is open closes the old one.
                self.close_current();
                let message = StreamingMessage::open(agent.kind, agent.name.clone());
                self.current = Some(message.id.clone());
                self.messages.push(message);
            }
            WorkflowEvent::AgentMessage { content, .. } => {
                if let Some(message) = self.current_mut() {
                    message.push_paragraph(content);
                }
            }
            WorkflowEvent::AgentContentChunk { chunk, .. } => {
                if let Some(message) = self.current_mut() {
                    message.push_chunk(chunk);
                }
            }
            WorkflowEvent::AgentComplete { content, .. } => {
                if let Some(message) = self.current_mut() {
                    message.finalize(Some(content));
                }
                self.current = None;
            }
            WorkflowEvent::Error { message } => {
                self.error = Some(message.clone());
            }
            WorkflowEvent::WorkflowStart { .. }
            | WorkflowEvent::AgentProgress { .. }
            | WorkflowEvent::WorkflowComplete => {}
            WorkflowEvent::Unknown => return false,
        }
        true
    }

    /// Count a record that failed to decode.
    pub fn record_dropped(&mut self, session: Session) -> bool {
        if !self.is_active(session) {
            return false;
        }
        self.dropped_records += 1;
        true
    }

    /// Record a failure of the stream itself.
    pub fn set_error(&mut self, session: Session, message: impl Into<String>) -> bool {
        if self.session != session.0 {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    /// End `session`: clear the streaming flag and close any open message.
    pub fn finish(&mut self, session: Session) -> bool {
        if !self.is_active(session) {
            return false;
        }
        self.close_current();
        self.is_streaming = false;
        true
    }

    /// End whatever stream is active. Does nothing when idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_streaming {
            return false;
        }
        self.close_current();
        self.is_streaming = false;
        true
    }

    /// Forget all messages and the last error.
    pub fn clear(&mut self) -> bool {
        if self.messages.is_empty() && self.error.is_none() {
            return false;
        }
        self.messages.clear();
        self.current = None;
        self.error = None;
        true
    }

    fn current_mut(&mut self) -> Option<&mut StreamingMessage> {
        let id = self.current.as_ref()?;
        self.messages.iter_mut().find(|m| &m.id == id)
    }

    fn close_current(&mut self) {
        if let Some(message) = self.current_mut() {
            message.finalize(None);
        }
        self.current = None;
    }
}
