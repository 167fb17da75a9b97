//! Configuration for the stream consumer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Consumer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. `http://127.0.0.1:3000`
    pub base_url: String,

    /// Path of the streaming endpoint
    pub stream_path: String,

    /// Connect timeout in seconds; the stream itself has no deadline
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            stream_path: "/api/chat/stream".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for a server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.stream_path.trim_start_matches('/')
        )
    }

    /// Connect timeout as a duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url_joins_cleanly() {
        assert_eq!(
            ClientConfig::new("http://localhost:8080/").stream_url(),
            "http://localhost:8080/api/chat/stream"
        );
    }
}
