//! Filesystem primitives behind the plain (non-git) move.

mod atomic;
mod copy;
mod helpers;
mod io_copy;
mod util;

pub use atomic::try_atomic_move;
pub use copy::safe_copy_and_rename;
pub use helpers::{io_error_with_help, io_error_with_help_io};

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    Renamed,
    Copied,
}

/// Move one file: atomic rename when possible, otherwise copy+rename then remove the source.
///
/// Only a cross-filesystem rename falls back to copying; any other rename error is
/// returned with nothing touched. An existing file at `dest` is replaced. The source
/// is only removed once the destination is fully written and in place.
pub fn rename_or_copy(src: &Path, dest: &Path) -> Result<MoveMethod> {
    move_with(src, dest, try_atomic_move)
}

fn move_with<F>(src: &Path, dest: &Path, rename: F) -> Result<MoveMethod>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(src, dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
            Ok(MoveMethod::Renamed)
        }
        Err(e) if util::is_cross_device(&e) => {
            warn!(error = %e, "Cross-filesystem rename, using safe copy+rename");
            let bytes = safe_copy_and_rename(src, dest)?;
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            debug!(bytes, "Copied file and removed original");
            Ok(MoveMethod::Copied)
        }
        Err(e) => Err(io_error_with_help("rename", src)(e)),
    }
}
