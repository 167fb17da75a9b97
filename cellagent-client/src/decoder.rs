//! Reassembly of stream lines across transport chunks.

/// Buffers raw bytes and yields complete lines.
///
/// Network reads may end anywhere, including in the middle of a multi-byte
/// UTF-8 character. Lines are only decoded once their terminating `\n` has
/// arrived; invalid UTF-8 is replaced rather than rejected so that the line
/// still reaches the record parser and is dropped there.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes and return every line they complete, without terminators.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            lines.push(String::from_utf8_lossy(&self.buffer[start..end]).into_owned());
            start = end + 1;
        }
        self.buffer.drain(..start);
        lines
    }

    /// Return whatever unterminated line is still buffered.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }

    /// Number of buffered bytes not yet forming a line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
