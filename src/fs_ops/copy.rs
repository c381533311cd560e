//! Copy-then-rename fallback used when a plain rename is impossible:
//! - copy to a hidden temp file next to the destination (fsynced)
//! - atomically rename temp -> destination
//! - the caller removes the source only after this returns Ok

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::{io_copy, util};

pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = util::unique_temp_path(dest_dir);

    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file", dest)(e)).with_context(|| {
            format!("finish copy of '{}'", src.display())
        });
    }

    Ok(bytes)
}
