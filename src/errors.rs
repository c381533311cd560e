//! Typed error definitions for relocate.
//! One variant per way a single move can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Source file '{}' does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("Source path '{}' is not a file.", .0.display())]
    NotAFile(PathBuf),

    #[error("Destination directory '{}' does not exist.", .0.display())]
    MissingDestinationDir(PathBuf),

    #[error("Operation cancelled; '{}' was left untouched.", .0.display())]
    OperationCancelled(PathBuf),

    // Fields are not named `source`: thiserror would treat that as the error cause.
    #[error("Error moving '{}' to '{}': {reason}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RelocateError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            RelocateError::NotFound(_) => 10,
            RelocateError::NotAFile(_) => 11,
            RelocateError::MissingDestinationDir(_) => 20,
            RelocateError::OperationCancelled(_) => 30,
            RelocateError::MoveFailed { .. } => 40,
            RelocateError::Unexpected(_) => 99,
        }
    }

    /// Short machine-friendly name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            RelocateError::NotFound(_) => "not_found",
            RelocateError::NotAFile(_) => "not_a_file",
            RelocateError::MissingDestinationDir(_) => "missing_destination_dir",
            RelocateError::OperationCancelled(_) => "operation_cancelled",
            RelocateError::MoveFailed { .. } => "move_failed",
            RelocateError::Unexpected(_) => "unexpected",
        }
    }

    pub(crate) fn move_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        RelocateError::MoveFailed {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for RelocateError {
    fn from(e: anyhow::Error) -> Self {
        RelocateError::Unexpected(format!("{e:#}"))
    }
}
