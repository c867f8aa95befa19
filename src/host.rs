//! Script host wrapping a persistent Lua context.

use std::path::Path;

use mlua::{FromLua, Lua, Value};
use tracing::debug;

use crate::config::HostConfig;
use crate::diagnostics::{split_position, Diagnostic, DiagnosticSink, StderrSink};
use crate::source::{line_at, SourceBuffer};
use crate::Result;

/// Executes Lua source against one long-lived context.
///
/// Source can come from a single file, an ordered batch of files joined by
/// newlines, or an in-memory string. Each run is independent; nothing is
/// cached between calls. Script failures are reported to the diagnostic
/// sink and surfaced to the caller only as a `false` result.
///
/// A host is single-threaded; callers serialize access themselves.
pub struct ScriptHost {
    lua: Lua,
    sink: Box<dyn DiagnosticSink>,
    stop_on_missing_file: bool,
}

impl ScriptHost {
    /// Create a host with a fresh Lua context and a stderr sink.
    pub fn new() -> Self {
        Self::with_context(Lua::new())
    }

    /// Create a host around an existing Lua context.
    ///
    /// The context is retained for the host's lifetime and released at
    /// teardown. `mlua::Lua` is reference counted, so other holders of the
    /// same context stay valid.
    pub fn with_context(lua: Lua) -> Self {
        Self {
            lua,
            sink: Box::new(StderrSink),
            stop_on_missing_file: false,
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink<S: DiagnosticSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Apply loader settings from a configuration.
    pub fn with_config(mut self, config: &HostConfig) -> Self {
        self.stop_on_missing_file = config.loader.stop_on_missing_file;
        self
    }

    /// Get a reference to the underlying Lua context.
    pub fn context(&self) -> &Lua {
        &self.lua
    }

    /// Look up a global binding by name.
    ///
    /// Unbound names yield `Value::Nil`, not an error.
    pub fn global(&self, name: &str) -> Result<Value> {
        Ok(self.lua.globals().get::<Value>(name)?)
    }

    /// Look up a global binding and convert it to a Rust value.
    pub fn global_as<V: FromLua>(&self, name: &str) -> Result<V> {
        Ok(self.lua.globals().get(name)?)
    }

    /// Read a script file and run it.
    ///
    /// An unreadable file is reported to the sink and the call returns
    /// `false` without compiling anything.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        debug!("loading script file {}", path.display());

        let mut buffer = SourceBuffer::new();
        if buffer.push_file(path).is_err() {
            self.sink.emit(&Diagnostic::UnreadableFile {
                path: path.display().to_string(),
            });
            return false;
        }
        buffer.finish();

        self.run_chunk(buffer.chunk(), &path.to_string_lossy())
    }

    /// Read an ordered batch of script files and run the concatenation as
    /// one unit.
    ///
    /// A newline is appended after every entry, readable or not, and the
    /// combined source runs under an empty chunk label. By default an
    /// unreadable file is reported and the batch continues; with
    /// `stop_on_missing_file` set the batch aborts instead and nothing
    /// runs.
    pub fn run_files<P: AsRef<Path>>(&self, files: &[P]) -> bool {
        let mut buffer = SourceBuffer::new();

        for file in files {
            let path = file.as_ref();
            if buffer.push_file(path).is_err() {
                self.sink.emit(&Diagnostic::UnreadableFile {
                    path: path.display().to_string(),
                });
                if self.stop_on_missing_file {
                    return false;
                }
            }
            buffer.push_separator();
        }
        buffer.finish();

        debug!(
            "running batch of {} file(s), {} bytes",
            files.len(),
            buffer.len()
        );
        self.run_chunk(buffer.chunk(), "")
    }

    /// Compile and run in-memory source, labeled for diagnostics.
    pub fn run_string(&self, code: &str, label: &str) -> bool {
        self.run_chunk(code.as_bytes(), label)
    }

    fn run_chunk(&self, source: &[u8], label: &str) -> bool {
        let function = match self.lua.load(source).set_name(label).into_function() {
            Ok(function) => function,
            Err(err) => {
                let message = engine_message(&err);
                let (line, reason) = split_position(&message);
                let source_line = line.and_then(|n| line_at(source, n));
                self.sink.emit(&Diagnostic::Compile {
                    chunk: label.to_string(),
                    message: reason.to_string(),
                    line,
                    source_line,
                });
                return false;
            }
        };

        match function.call::<()>(()) {
            Ok(()) => true,
            Err(err) => {
                let message = engine_message(&err);
                // Drop the traceback mlua appends after the first line.
                let message = message.lines().next().unwrap_or_default().to_string();
                self.sink.emit(&Diagnostic::Runtime { message });
                false
            }
        }
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

fn engine_message(err: &mlua::Error) -> String {
    match err {
        mlua::Error::SyntaxError { message, .. } => message.clone(),
        mlua::Error::RuntimeError(message) => message.clone(),
        other => other.to_string(),
    }
}
