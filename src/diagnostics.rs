//! Script diagnostics and the sinks that receive them.
//!
//! Compile and runtime failures never escape the host as errors; they are
//! rendered as human-readable text and handed to a [`DiagnosticSink`]. The
//! default sink writes to stderr; tests inject a [`BufferSink`] to capture
//! output instead of redirecting a real stream.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A single diagnostic event emitted while loading or running a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A script file could not be opened or read.
    UnreadableFile {
        /// Path as given by the caller.
        path: String,
    },
    /// The engine rejected the source before execution.
    Compile {
        /// Chunk label the source was compiled under.
        chunk: String,
        /// Engine error text, without its position prefix.
        message: String,
        /// 1-based line number, when the engine reported one.
        line: Option<u32>,
        /// The offending source line, when it could be recovered.
        source_line: Option<String>,
    },
    /// Execution started and raised an uncaught error.
    Runtime {
        /// Engine error text.
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnreadableFile { path } => {
                write!(f, "Could not read file '{path}'")
            }
            Diagnostic::Compile {
                chunk,
                message,
                line,
                source_line,
            } => {
                writeln!(f, "+----")?;
                writeln!(f, "| Error in {chunk}:{message}")?;
                if let Some(line) = line {
                    writeln!(f, "| ({}):{}", line, source_line.as_deref().unwrap_or(""))?;
                }
                write!(f, "+----")
            }
            Diagnostic::Runtime { message } => {
                write!(f, "Script Error: {message}")
            }
        }
    }
}

/// Receiver for rendered diagnostics.
pub trait DiagnosticSink {
    /// Deliver one diagnostic. Called at the point of detection.
    fn emit(&self, diag: &Diagnostic);
}

/// Sink that renders diagnostics to the process error stream.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, diag: &Diagnostic) {
        eprintln!("{diag}");
    }
}

/// Sink that captures rendered diagnostics in memory.
///
/// Cloning shares the underlying buffer, so a test can keep one clone and
/// hand the other to the host.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    entries: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered diagnostics, in emission order.
    pub fn rendered(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// True if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// True if any rendered diagnostic contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.contains(needle))
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&self, diag: &Diagnostic) {
        self.entries.lock().unwrap().push(diag.to_string());
    }
}

/// Split an engine error message into its reported line number and reason.
///
/// Lua positions look like `<chunk>:<line>: <reason>`, with the chunk part
/// possibly containing its own colons (`[string "name"]`). The first
/// `:<digits>:` sequence is taken as the position; without one the whole
/// first line is returned as the reason.
pub(crate) fn split_position(message: &str) -> (Option<u32>, &str) {
    let first = message.lines().next().unwrap_or(message);

    let mut search = 0;
    while let Some(rel) = first[search..].find(':') {
        let idx = search + rel;
        let tail = &first[idx + 1..];
        let digits = tail.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 && tail.as_bytes().get(digits) == Some(&b':') {
            let line = tail[..digits].parse().ok();
            return (line, tail[digits + 1..].trim_start());
        }
        search = idx + 1;
    }

    (None, first)
}
