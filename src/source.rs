//! Source buffer assembly for script execution.

use std::fs;
use std::path::Path;

use crate::Result;

/// Raw script source assembled from one or more inputs.
///
/// Bytes are appended file by file, with a single newline separator after
/// each entry in batch mode and a null terminator appended by [`finish`].
/// A file is always read completely before anything else is appended, so
/// the buffer never contains a partially read file.
///
/// [`finish`]: SourceBuffer::finish
#[derive(Debug, Default)]
pub struct SourceBuffer {
    data: Vec<u8>,
    terminated: bool,
}

impl SourceBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the entire contents of a file, byte for byte.
    ///
    /// On failure nothing is appended and the buffer is left unchanged.
    pub fn push_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = fs::read(path.as_ref())?;
        self.data.extend_from_slice(&bytes);
        Ok(())
    }

    /// Append in-memory source text.
    pub fn push_str(&mut self, code: &str) {
        self.data.extend_from_slice(code.as_bytes());
    }

    /// Append the newline separator used between batch entries.
    pub fn push_separator(&mut self) {
        self.data.push(b'\n');
    }

    /// Append the null terminator. Idempotent.
    pub fn finish(&mut self) {
        if !self.terminated {
            self.data.push(0);
            self.terminated = true;
        }
    }

    /// The source bytes to hand to the engine, excluding the terminator.
    pub fn chunk(&self) -> &[u8] {
        if self.terminated {
            &self.data[..self.data.len() - 1]
        } else {
            &self.data
        }
    }

    /// Total buffered length, including the terminator once appended.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Look up the 1-based `line` in `source`, without its line ending.
///
/// Returns `None` when the line number is out of range. Non-UTF-8 bytes are
/// replaced rather than rejected, since this only feeds diagnostics.
pub(crate) fn line_at(source: &[u8], line: u32) -> Option<String> {
    if line == 0 {
        return None;
    }
    let text = String::from_utf8_lossy(source);
    text.split('\n')
        .nth(line as usize - 1)
        .map(|l| l.trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_push_str_and_finish() {
        let mut buf = SourceBuffer::new();
        buf.push_str("x = 1");
        buf.finish();

        assert_eq!(buf.chunk(), b"x = 1");
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut buf = SourceBuffer::new();
        buf.push_str("x = 1");
        buf.finish();
        buf.finish();

        assert_eq!(buf.len(), 6);
        assert_eq!(buf.chunk(), b"x = 1");
    }

    #[test]
    fn test_chunk_before_finish() {
        let mut buf = SourceBuffer::new();
        buf.push_str("x = 1");
        assert_eq!(buf.chunk(), b"x = 1");
    }

    #[test]
    fn test_push_file_appends_all_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.lua");
        fs::write(&path, "a = 1\nb = 2\n").unwrap();

        let mut buf = SourceBuffer::new();
        buf.push_file(&path).unwrap();
        buf.finish();

        assert_eq!(buf.chunk(), b"a = 1\nb = 2\n");
    }

    #[test]
    fn test_push_file_missing_leaves_buffer_unchanged() {
        let dir = tempdir().unwrap();

        let mut buf = SourceBuffer::new();
        buf.push_str("before");
        let result = buf.push_file(dir.path().join("nope.lua"));

        assert!(result.is_err());
        assert_eq!(buf.chunk(), b"before");
    }

    #[test]
    fn test_batch_assembly_separators() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.lua");
        let b = dir.path().join("b.lua");
        fs::write(&a, "a = 1").unwrap();
        fs::write(&b, "b = 2").unwrap();

        let mut buf = SourceBuffer::new();
        buf.push_file(&a).unwrap();
        buf.push_separator();
        buf.push_file(&b).unwrap();
        buf.push_separator();
        buf.finish();

        assert_eq!(buf.chunk(), b"a = 1\nb = 2\n");
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = SourceBuffer::new();
        assert!(buf.is_empty());

        buf.finish();
        assert!(!buf.is_empty());
        assert_eq!(buf.chunk(), b"");
    }

    #[test]
    fn test_line_at() {
        let source = b"first\nsecond\nthird";
        assert_eq!(line_at(source, 1), Some("first".to_string()));
        assert_eq!(line_at(source, 2), Some("second".to_string()));
        assert_eq!(line_at(source, 3), Some("third".to_string()));
        assert_eq!(line_at(source, 4), None);
        assert_eq!(line_at(source, 0), None);
    }

    #[test]
    fn test_line_at_strips_carriage_return() {
        let source = b"first\r\nsecond\r\n";
        assert_eq!(line_at(source, 1), Some("first".to_string()));
        assert_eq!(line_at(source, 2), Some("second".to_string()));
    }
}
