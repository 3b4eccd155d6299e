use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish caller mistakes from
/// failures while loading or processing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - views were rendered (an empty result is still a success)
    Success = 0,
    /// Invalid command-line arguments or filter requests
    InvalidArguments = 2,
    /// Application error (unreadable snapshot, malformed catalog, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error that reached `main`.
    ///
    /// Caller-contract violations map to `InvalidArguments`, everything else
    /// to `ApplicationError`.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<InventoryError>() {
            Some(err) if err.is_caller_error() => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
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

/// Application-specific errors for inventory exploration.
///
/// Data-quality problems inside a snapshot (malformed properties, dangling
/// references) never become an `InventoryError`; they are absorbed by the
/// resolver and reported as diagnostics.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Snapshot file not found: {path}\n\n💡 Hint: {suggestion}")]
    SnapshotNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse snapshot: {path}\nDetails: {details}\n\n💡 Hint: The snapshot must be valid JSON")]
    SnapshotParseError { path: PathBuf, details: String },

    #[error("Malformed catalog: {details}\n\n💡 Hint: Provide a JSON array of resources, an object with a \"resources\" array, or an inventory export")]
    MalformedCatalog { details: String },

    #[error("Duplicate resource id in snapshot: {id}\n\n💡 Hint: Resource ids must be unique across the snapshot")]
    DuplicateResourceId { id: String },

    #[error("Unknown filter dimension: '{dimension}'\n\n💡 Hint: Supported dimensions are: {supported}")]
    InvalidFilterDimension { dimension: String, supported: String },

    #[error("Invalid filter expression: '{expression}'\nReason: {reason}\n\n💡 Hint: Use the form DIMENSION=VALUE[,VALUE...] (e.g. resourceGroup=rg-prod)")]
    InvalidFilterExpression { expression: String, reason: String },

    #[error("Resource not found in catalog: {id}\n\n💡 Hint: Use the id column of the explorer view")]
    UnknownResource { id: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration and builder inputs
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl InventoryError {
    /// Whether this error signals a mistake by the caller rather than bad data
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            InventoryError::InvalidFilterDimension { .. }
                | InventoryError::InvalidFilterExpression { .. }
                | InventoryError::UnknownResource { .. }
        )
    }
}
