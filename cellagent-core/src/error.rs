//! Error types for the cellagent framework.
//!
//! Every fallible operation in the core, workflow and server crates returns
//! [`CellAgentError`]. The client crate wraps it in its own transport-aware
//! error type.

use thiserror::Error;

/// Result type alias for cellagent operations.
pub type Result<T> = std::result::Result<T, CellAgentError>;

/// Core error types for cellagent.
#[derive(Error, Debug)]
pub enum CellAgentError {
    /// I/O related errors (config files, sockets)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message
        message: String,
    },

    /// Agent catalog lookup errors
    #[error("Catalog error: {message}")]
    Catalog {
        /// Detailed error message
        message: String,
    },

    /// Input validation errors
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Offending field
        field: String,
        /// Detailed error message
        message: String,
    },

    /// The receiving side of an event sink went away
    #[error("Event sink closed")]
    SinkClosed,

    /// Simulation failures inside the workflow driver
    #[error("Workflow error: {message}")]
    Workflow {
        /// Detailed error message
        message: String,
    },
}

impl CellAgentError {
    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a catalog error.
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a workflow error.
    pub fn workflow<S: Into<String>>(message: S) -> Self {
        Self::Workflow {
            message: message.into(),
        }
    }

    /// Whether the error means the consumer disconnected rather than something broke.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::SinkClosed)
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Configuration { .. } => "configuration",
            Self::Catalog { .. } => "catalog",
            Self::Validation { .. } => "validation",
            Self::SinkClosed => "sink_closed",
            Self::Workflow { .. } => "workflow",
        }
    }
}

impl From<toml::de::Error> for CellAgentError {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(format!("Invalid TOML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CellAgentError::catalog("no result text for filter");
        assert!(matches!(err, CellAgentError::Catalog { .. }));
        assert_eq!(err.category(), "catalog");
    }

    #[test]
    fn test_disconnect_detection() {
        assert!(CellAgentError::SinkClosed.is_disconnect());
        assert!(!CellAgentError::workflow("boom").is_disconnect());
    }

    #[test]
    fn test_error_display() {
        let err = CellAgentError::validation("chunk_size", "must be greater than zero");
        let display = format!("{err}");
        assert!(display.contains("chunk_size"));
        assert!(display.contains("greater than zero"));
    }
}
