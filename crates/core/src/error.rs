use std::io;

/// Errors that can occur during module-installer operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Interpreter resolution error: {0}")]
    InterpreterError(String),

    #[error("Unknown {kind} {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid module name: {0:?}")]
    InvalidModuleName(String),

    #[error("Failed to run `{command}`: {source}")]
    ProcessError {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with status {code:?}")]
    InstallFailed { command: String, code: Option<i32> },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for module-installer operations
pub type Result<T> = std::result::Result<T, Error>;
