//! Error handling module for stackwiz
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Prompt cancellation is its own variant so the orchestrator can tell a user
//! abort apart from a real failure.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the wizard
#[derive(Error, Debug)]
pub enum WizardError {
    /// The user aborted a prompt (Esc, Ctrl+C, closed input)
    #[error("Prompt cancelled")]
    Cancelled,

    /// IO errors (terminal, answers file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt rendering/reading errors that are not a cancellation
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Validation errors (project name, scaffold paths, answers)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The project bootstrap command failed
    #[error("Project bootstrap failed: {0}")]
    Bootstrap(String),

    /// Creating a scaffold path failed
    #[error("Failed to scaffold {}: {source}", .path.display())]
    Scaffold {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;

impl WizardError {
    /// Create a prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a bootstrap error
    pub fn bootstrap(msg: impl Into<String>) -> Self {
        Self::Bootstrap(msg.into())
    }

    /// Create a scaffold error for `path`
    pub fn scaffold(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scaffold {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a user cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
