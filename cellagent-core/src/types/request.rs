//! Chat stream request body.

use serde::{Deserialize, Serialize};

/// Metadata of a file attached to a chat turn. Accepted and logged, never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// File name
    #[serde(default)]
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

/// Body of `POST /api/chat/stream`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStreamRequest {
    /// Free-text user request
    pub message: String,
    /// Attached file metadata
    #[serde(default)]
    pub files: Vec<FileMetadata>,
    /// Whether the user enabled web search
    #[serde(rename = "webSearch", default)]
    pub web_search: bool,
}

impl ChatStreamRequest {
    /// Create a request with no attachments.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach file metadata.
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileMetadata>) -> Self {
        self.files = files;
        self
    }

    /// Set the web search flag.
    #[must_use]
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_body_decodes() {
        let req: ChatStreamRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req, ChatStreamRequest::new("hi"));
    }

    #[test]
    fn test_browser_file_objects_are_tolerated() {
        // Browsers serialize `File` objects as `{}`.
        let req: ChatStreamRequest =
            serde_json::from_str(r#"{"message":"hi","files":[{}, {"name":"a.h5ad","size":12}]}"#)
                .unwrap();
        assert_eq!(req.files.len(), 2);
        assert_eq!(req.files[1].name, "a.h5ad");
        assert!(!req.web_search);
    }
}
