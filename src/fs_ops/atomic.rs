//! Atomic rename helper.
//! - On Windows an existing destination is removed first (MoveFile doesn't overwrite).
//! - On Unix the destination directory is fsynced after the rename (best-effort).

use std::fs;
use std::io;
use std::path::Path;

use super::util;

pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst) {
            // Already gone is fine: the rename below takes its place either way.
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }

    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let dir = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
        let _ = util::fsync_dir(dir);
    }

    Ok(())
}
