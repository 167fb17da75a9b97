//! Server-sent event framing for workflow events.
//!
//! Each record is a single `data: <json>` line followed by a blank line.
//! There are no `id:` or `retry:` fields; the stream is forward-only.

use crate::types::WorkflowEvent;
use crate::Result;

/// Prefix of every data line.
pub const DATA_PREFIX: &str = "data: ";

/// Content type of the workflow stream.
pub const CONTENT_TYPE: &str = "text/event-stream";

/// Encode one event as a complete SSE record.
pub fn encode_frame(event: &WorkflowEvent) -> Result<String> {
    let json = serde_json::to_string(event)?;
    Ok(format!("{DATA_PREFIX}{json}\n\n"))
}

/// Decode one line of the stream.
///
/// Returns `Ok(None)` for lines that are not data records (blank separators,
/// comments, other fields) and an error for data records whose JSON payload
/// does not decode.
pub fn decode_line(line: &str) -> Result<Option<WorkflowEvent>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => Ok(Some(serde_json::from_str(payload)?)),
        None => Ok(None),
    }
}
