use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used as the underlying cause of an evaluation failure.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every declared dependency was resolved (or none were declared)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (workspace, evaluation, resolution, I/O, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency extraction and resolution.
///
/// Every pipeline stage fails with one of these. They are carried through
/// `anyhow::Error`, so callers match on them with `downcast_ref`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Workspace failure: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the temporary directory is writable")]
    Workspace { path: PathBuf, details: String },

    #[error("Failed to evaluate build descriptor: {descriptor}\nDetails: {details}\n\n💡 Hint: Please verify that the build script declares a 'runtime' configuration")]
    Evaluation {
        descriptor: String,
        details: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Failed to resolve dependency: {coordinate}\nDetails: {details}\n\n💡 Hint: Please check the declared repositories and your network connection")]
    Resolution { coordinate: String, details: String },

    #[error("Build descriptor not found: {location}")]
    DescriptorNotFound { location: String },

    #[error("Failed to read build descriptor: {location}\nDetails: {details}")]
    DescriptorRead { location: String, details: String },

    /// Validation error for builder patterns and value objects
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl RuntimeError {
    /// Wraps an engine failure as an evaluation error, keeping it as the cause.
    pub fn evaluation(descriptor: impl Into<String>, cause: anyhow::Error) -> Self {
        RuntimeError::Evaluation {
            descriptor: descriptor.into(),
            details: cause.to_string(),
            source: Some(cause.into()),
        }
    }

    /// An evaluation error that has no underlying engine failure.
    pub fn evaluation_shape(descriptor: impl Into<String>, details: impl Into<String>) -> Self {
        RuntimeError::Evaluation {
            descriptor: descriptor.into(),
            details: details.into(),
            source: None,
        }
    }

    pub fn is_evaluation(&self) -> bool {
        matches!(self, RuntimeError::Evaluation { .. })
    }
}
