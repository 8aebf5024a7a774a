//! Custom error types for SupaBrowser
//!
//! Every failure reports one of two kinds: a validation failure the caller
//! can fix by changing its input, or a failure of an external collaborator.

use thiserror::Error;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected before anything external was called
    Validation,
    /// The model endpoint, the browser driver or the agent failed
    ExternalCall,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::ExternalCall => write!(f, "external_call"),
        }
    }
}

/// Main error type for SupaBrowser operations
#[derive(Error, Debug)]
pub enum SupaBrowserError {
    /// Rejected input (blank credential, malformed request)
    #[error("{0}")]
    Validation(String),

    /// Model name outside the supported set
    #[error("Unsupported model '{0}'")]
    UnsupportedModel(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anthropic API errors
    #[error("Anthropic API error: {0}")]
    Anthropic(String),

    /// Browser automation errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// Agent-browser not installed
    #[error("agent-browser not found. Install with: npm install -g agent-browser && agent-browser install")]
    AgentBrowserNotFound,

    /// Failure raised by an agent while running a task
    #[error("{0}")]
    Agent(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for SupaBrowser operations
pub type Result<T> = std::result::Result<T, SupaBrowserError>;

impl SupaBrowserError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an Anthropic API error
    pub fn anthropic(msg: impl Into<String>) -> Self {
        Self::Anthropic(msg.into())
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an agent error
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::UnsupportedModel(_) => ErrorKind::Validation,
            _ => ErrorKind::ExternalCall,
        }
    }

    /// Whether the caller can recover by changing its input
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
