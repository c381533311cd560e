//! The move primitive behind the relocator, and its plain-filesystem backend.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::RelocateError;
use crate::fs_ops::{self, MoveMethod};
use crate::relocator::MoveOutcome;

/// Performs the actual move once validation is done.
///
/// `overwrite` is true only when an existing destination file may be replaced
/// (forced or confirmed by the user).
pub trait Mover {
    /// Short name used in logs.
    fn label(&self) -> &'static str;

    fn move_file(&self, source: &Path, destination: &Path, overwrite: bool)
    -> Result<(), RelocateError>;

    /// Command the user should run next, if the backend leaves work to do.
    fn follow_up(&self, _outcome: &MoveOutcome) -> Option<String> {
        None
    }
}

/// Rename, falling back to copy+rename+remove across filesystems.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl Mover for FsMover {
    fn label(&self) -> &'static str {
        "filesystem"
    }

    fn move_file(
        &self,
        source: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> Result<(), RelocateError> {
        if !overwrite && fs::symlink_metadata(destination).is_ok() {
            return Err(RelocateError::move_failed(
                source,
                destination,
                "destination appeared while preparing the move; refusing to overwrite it",
            ));
        }

        match fs_ops::rename_or_copy(source, destination) {
            Ok(MoveMethod::Renamed) => Ok(()),
            Ok(MoveMethod::Copied) => {
                debug!(src = %source.display(), dest = %destination.display(), "Moved by copy");
                Ok(())
            }
            Err(e) => Err(RelocateError::move_failed(source, destination, format!("{e:#}"))),
        }
    }
}
