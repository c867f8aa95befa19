//! luahost - Embeddable Lua script host
//!
//! Loads Lua source from files or strings, executes it against a persistent
//! Lua context, and reports compile and runtime errors to a pluggable
//! diagnostic sink. Callers observe success or failure as a boolean; script
//! failures never propagate as Rust errors.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod logging;
pub mod source;

pub use config::{HostConfig, LoaderConfig, LoggingConfig};
pub use diagnostics::{BufferSink, Diagnostic, DiagnosticSink, StderrSink};
pub use error::{HostError, Result};
pub use host::ScriptHost;
pub use source::SourceBuffer;
