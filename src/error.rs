use thiserror::Error;

/// Unified error type for watchy-dev operations
#[derive(Error, Debug)]
pub enum DevError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Release error: {0}")]
    Release(String),

    #[error("'{program}' not found; is it installed and on PATH?")]
    ToolNotFound { program: String },

    #[error("'{program} {args}' failed with exit code {code}\n{stderr}")]
    ToolFailed {
        program: String,
        args: String,
        code: i32,
        stderr: String,
    },

    #[error("Simulator error: {0}")]
    Simulator(String),

    #[error("Scaffold error: {0}")]
    Scaffold(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in watchy-dev
pub type Result<T> = std::result::Result<T, DevError>;

impl DevError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DevError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        DevError::Version(msg.into())
    }

    /// Create a release error with context
    pub fn release(msg: impl Into<String>) -> Self {
        DevError::Release(msg.into())
    }

    pub fn simulator(msg: impl Into<String>) -> Self {
        DevError::Simulator(msg.into())
    }

    pub fn scaffold(msg: impl Into<String>) -> Self {
        DevError::Scaffold(msg.into())
    }
}
