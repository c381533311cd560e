//! The move request and destination resolution.

use std::path::{Path, PathBuf};

use crate::errors::RelocateError;

/// One relocation, as asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Create the destination's missing parent directories.
    pub create_dirs: bool,
    /// Replace an existing destination file without asking.
    pub force: bool,
}

impl MoveRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            create_dirs: false,
            force: false,
        }
    }

    pub fn create_dirs(mut self, yes: bool) -> Self {
        self.create_dirs = yes;
        self
    }

    pub fn force(mut self, yes: bool) -> Self {
        self.force = yes;
        self
    }
}

/// True when the path is spelled with a trailing separator (`out/`), i.e. names a directory.
pub fn names_directory(path: &Path) -> bool {
    let s = path.as_os_str().to_string_lossy();
    s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR)
}

/// Final file path for `source` moved to `destination`.
///
/// An existing directory, or a path written with a trailing separator, receives the
/// source's file name; anything else is taken verbatim.
pub fn resolve_destination(source: &Path, destination: &Path) -> Result<PathBuf, RelocateError> {
    if destination.is_dir() || names_directory(destination) {
        let file_name = source
            .file_name()
            .ok_or_else(|| RelocateError::NotAFile(source.to_path_buf()))?;
        Ok(destination.join(file_name))
    } else {
        Ok(destination.to_path_buf())
    }
}

/// Directory the resolved destination lives in; `None` means the current directory.
pub fn destination_dir(resolved: &Path) -> Option<&Path> {
    resolved.parent().filter(|p| !p.as_os_str().is_empty())
}
