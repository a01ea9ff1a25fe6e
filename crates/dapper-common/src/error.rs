//! Unified error types for the Dapper workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DapperError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The container engine exited unsuccessfully.
    #[error("`{command}` failed ({status}){}", format_stderr(.stderr))]
    Engine {
        /// Full command line, reproducible by hand.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, when the output was captured.
        stderr: Option<String>,
    },

    /// The image environment could not be turned into a descriptor.
    #[error("malformed image environment: {message}")]
    MalformedEnv {
        /// Description of what was wrong with the payload.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

fn format_stderr(stderr: &Option<String>) -> String {
    match stderr.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!(": {s}"),
        _ => String::new(),
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_includes_command_and_stderr() {
        let err = DapperError::Engine {
            command: "docker build -t proj -f Dockerfile.dapper .".into(),
            status: "exit status: 1".into(),
            stderr: Some("no such file\n".into()),
        };
        assert_eq!(
            err.to_string(),
            "`docker build -t proj -f Dockerfile.dapper .` failed (exit status: 1): no such file"
        );
    }

    #[test]
    fn engine_error_without_stderr() {
        let err = DapperError::Engine {
            command: "docker run proj".into(),
            status: "exit status: 2".into(),
            stderr: None,
        };
        assert_eq!(err.to_string(), "`docker run proj` failed (exit status: 2)");
    }
}
