//! Line splitting for NDJSON response bodies that arrive in arbitrary chunks.

/// Accumulates body chunks and yields complete, non-blank lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Appends a chunk.
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Removes and returns the next complete line, without its terminator.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            let trimmed = line.trim_ascii();
            if !trimmed.is_empty() {
                return Some(trimmed.to_vec());
            }
        }
        None
    }

    /// Returns an unterminated trailing line once the body has ended.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        let rest = std::mem::take(&mut self.pending);
        let trimmed = rest.trim_ascii();
        (!trimmed.is_empty()).then(|| trimmed.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut buffer = LineBuffer::default();

        buffer.push(b"{\"a\":");
        assert_eq!(buffer.next_line(), None);
        buffer.push(b"1}\n{\"b\":2}\n{\"c\"");

        assert_eq!(buffer.next_line().as_deref(), Some(&b"{\"a\":1}"[..]));
        assert_eq!(buffer.next_line().as_deref(), Some(&b"{\"b\":2}"[..]));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.finish().as_deref(), Some(&b"{\"c\""[..]));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut buffer = LineBuffer::default();

        buffer.push(b"\n\r\n{}\r\n\n");

        assert_eq!(buffer.next_line().as_deref(), Some(&b"{}"[..]));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.finish(), None);
    }
}
