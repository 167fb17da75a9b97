//! HTTP consumer of the workflow stream.

use cellagent_core::config::ClientConfig;
use cellagent_core::{sse, ChatStreamRequest, FileMetadata};
use futures_util::StreamExt;
use tokio::sync::{oneshot, watch, Mutex};
use tracing::{debug, info, warn};

use crate::decoder::LineDecoder;
use crate::error::{ClientError, Result};
use crate::state::{Session, StreamState};

/// How a call to [`StreamClient::start_stream`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The server closed the stream
    Completed,
    /// [`StreamClient::stop_stream`] was called before the stream ended
    Stopped,
    /// Another stream was active; nothing was requested
    AlreadyStreaming,
}

/// Opens workflow streams and projects them into a [`StreamState`].
///
/// At most one stream is read at a time. State changes are published
/// through a `watch` channel so a UI can re-render on every record.
#[derive(Debug)]
pub struct StreamClient {
    http: reqwest::Client,
    config: ClientConfig,
    state: watch::Sender<StreamState>,
    abort: Mutex<Option<(Session, oneshot::Sender<()>)>>,
}

impl StreamClient {
    /// Create a client for the server described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of an existing HTTP client.
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        let (state, _) = watch::channel(StreamState::new());
        Self {
            http,
            config,
            state,
            abort: Mutex::new(None),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StreamState {
        self.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<StreamState> {
        self.state.subscribe()
    }

    /// Send a chat request and read its workflow stream to the end.
    ///
    /// Returns [`StreamOutcome::AlreadyStreaming`] without touching the state
    /// when a stream is already being read. On every other exit the
    /// streaming flag is cleared and any open message is closed. Transport
    /// failures and non-success statuses are returned as errors after being
    /// recorded in the state.
    pub async fn start_stream(
        &self,
        message: impl Into<String>,
        files: Vec<FileMetadata>,
        web_search: bool,
    ) -> Result<StreamOutcome> {
        // Held until the abort handle is installed so a concurrent stop
        // cannot slip between the two.
        let mut abort_slot = self.abort.lock().await;
        let mut session = None;
        self.state.send_if_modified(|state| {
            session = state.begin();
            session.is_some()
        });
        let Some(session) = session else {
            debug!("Stream already active, ignoring new request");
            return Ok(StreamOutcome::AlreadyStreaming);
        };
        let (abort_tx, abort_rx) = oneshot::channel();
        *abort_slot = Some((session, abort_tx));
        drop(abort_slot);

        let request = ChatStreamRequest::new(message)
            .with_files(files)
            .with_web_search(web_search);
        let result = self.consume(session, &request, abort_rx).await;

        {
            let mut abort = self.abort.lock().await;
            if abort.as_ref().is_some_and(|(owner, _)| *owner == session) {
                abort.take();
            }
        }

        match &result {
            Ok(outcome) => debug!("Stream ended: {:?}", outcome),
            Err(e) => {
                warn!("Stream failed ({}): {}", e.category(), e);
                self.state
                    .send_if_modified(|state| state.set_error(session, e.to_string()));
            }
        }
        self.state.send_if_modified(|state| state.finish(session));
        result
    }

    /// Stop reading the active stream.
    ///
    /// Closes the open message with whatever content it has. Calling this
    /// while idle does nothing. The server is not told; it notices only when
    /// the dropped connection closes its side.
    pub async fn stop_stream(&self) {
        let mut abort_slot = self.abort.lock().await;
        if let Some((_, abort)) = abort_slot.take() {
            let _ = abort.send(());
        }
        if self.state.send_if_modified(StreamState::stop) {
            info!("Stream stopped by client");
        }
    }

    /// Forget all messages and the last error.
    pub fn clear_messages(&self) {
        self.state.send_if_modified(StreamState::clear);
    }

    async fn consume(
        &self,
        session: Session,
        request: &ChatStreamRequest,
        mut abort: oneshot::Receiver<()>,
    ) -> Result<StreamOutcome> {
        let url = self.config.stream_url();
        info!("Opening workflow stream at {}", url);

        let response = tokio::select! {
            response = self.http.post(&url).json(request).send() => response?,
            Ok(()) = &mut abort => return Ok(StreamOutcome::Stopped),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::http_status(status.as_u16(), body));
        }

        let mut body = response.bytes_stream();
        let mut decoder = LineDecoder::new();
        loop {
            if !self.state.borrow().is_active(session) {
                return Ok(StreamOutcome::Stopped);
            }
            let next = tokio::select! {
                next = body.next() => next,
                Ok(()) = &mut abort => return Ok(StreamOutcome::Stopped),
            };
            let Some(bytes) = next else {
                break;
            };
            for line in decoder.push(&bytes?) {
                self.handle_line(session, &line);
            }
        }

        if let Some(line) = decoder.finish() {
            self.handle_line(session, &line);
        }
        Ok(StreamOutcome::Completed)
    }

    fn handle_line(&self, session: Session, line: &str) {
        match sse::decode_line(line) {
            Ok(Some(event)) => {
                self.state
                    .send_if_modified(|state| state.dispatch(session, &event));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Dropping malformed stream record: {}", e);
                self.state
                    .send_if_modified(|state| state.record_dropped(session));
            }
        }
    }
}
