//! Error types for luahost.

use thiserror::Error;

/// Common error type for host operations.
///
/// Script compile and runtime failures are not represented here; they are
/// reported through the diagnostic sink and a boolean result. This type
/// covers the fallible host-side paths: I/O, configuration, and direct
/// engine access such as global lookups.
#[derive(Error, Debug)]
pub enum HostError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the Lua engine.
    #[error("engine error: {0}")]
    Engine(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<mlua::Error> for HostError {
    fn from(e: mlua::Error) -> Self {
        HostError::Engine(e.to_string())
    }
}

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = HostError::Engine("attempt to index a nil value".to_string());
        assert_eq!(
            err.to_string(),
            "engine error: attempt to index a nil value"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = HostError::Config("missing section".to_string());
        assert_eq!(err.to_string(), "configuration error: missing section");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HostError = io_err.into();
        assert!(matches!(err, HostError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_mlua_error_conversion() {
        let lua_err = mlua::Error::RuntimeError("boom".to_string());
        let err: HostError = lua_err.into();
        assert!(matches!(err, HostError::Engine(_)));
        assert!(err.to_string().contains("boom"));
    }
}
