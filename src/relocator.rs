//! Validation-then-action pipeline for a single file move.
//!
//! Steps, in order: source exists → source is a regular file → resolve destination →
//! refuse same-file / directory targets → ensure the destination directory →
//! confirm overwrite → move. Nothing is mutated before the first two checks pass,
//! and a declined overwrite mutates nothing at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::RelocateError;
use crate::fs_ops::io_error_with_help;
use crate::mover::Mover;
use crate::prompt::Confirm;
use crate::request::{MoveRequest, destination_dir, resolve_destination};

/// What a successful relocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub source: PathBuf,
    /// Resolved destination file path.
    pub destination: PathBuf,
    /// Directory created for the destination, if any.
    pub created_dir: Option<PathBuf>,
    /// An existing destination file was replaced.
    pub replaced_existing: bool,
}

/// Prompt shown before replacing `destination`.
pub fn overwrite_prompt(destination: &Path) -> String {
    format!(
        "File '{}' already exists. Overwrite? (y/n): ",
        destination.display()
    )
}

/// Run one relocation with the given move backend and confirmation source.
pub fn relocate<M, C>(
    request: &MoveRequest,
    mover: &M,
    confirm: &mut C,
) -> Result<MoveOutcome, RelocateError>
where
    M: Mover + ?Sized,
    C: Confirm + ?Sized,
{
    let source = request.source.as_path();

    let source_meta = match fs::metadata(source) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RelocateError::NotFound(source.to_path_buf()));
        }
        Err(e) => {
            return Err(io_error_with_help("inspect source", source)(e).into());
        }
    };
    if !source_meta.is_file() {
        return Err(RelocateError::NotAFile(source.to_path_buf()));
    }
    debug!(src = %source.display(), "Source is a regular file");

    let destination = resolve_destination(source, &request.destination)?;
    debug!(dest = %destination.display(), "Resolved destination");

    // Not following symlinks: a dangling link is still an entry to replace.
    let existing = fs::symlink_metadata(&destination).ok();
    if let Some(meta) = &existing {
        if meta.is_dir() {
            return Err(RelocateError::move_failed(
                source,
                &destination,
                "destination is a directory",
            ));
        }
        if same_file(source, &destination) {
            return Err(RelocateError::move_failed(
                source,
                &destination,
                "source and destination are the same file",
            ));
        }
    }

    let created_dir = ensure_destination_dir(&destination, request.create_dirs)?;

    let replaced_existing = match &existing {
        Some(_) => {
            if request.force {
                debug!(dest = %destination.display(), "Forcing overwrite of existing file");
            } else {
                let agreed = confirm
                    .confirm(&overwrite_prompt(&destination))
                    .map_err(|e| RelocateError::Unexpected(format!("failed reading confirmation: {e}")))?;
                if !agreed {
                    info!(dest = %destination.display(), "Overwrite declined");
                    return Err(RelocateError::OperationCancelled(destination));
                }
            }
            true
        }
        None => false,
    };

    mover.move_file(source, &destination, replaced_existing)?;
    info!(
        backend = mover.label(),
        src = %source.display(),
        dest = %destination.display(),
        replaced_existing,
        "Moved file"
    );

    Ok(MoveOutcome {
        source: source.to_path_buf(),
        destination,
        created_dir,
        replaced_existing,
    })
}

/// Make sure the directory holding `destination` exists; returns it when it had to be created.
fn ensure_destination_dir(
    destination: &Path,
    create_dirs: bool,
) -> Result<Option<PathBuf>, RelocateError> {
    let Some(dir) = destination_dir(destination) else {
        return Ok(None);
    };
    if dir.is_dir() {
        return Ok(None);
    }
    if !create_dirs {
        return Err(RelocateError::MissingDestinationDir(dir.to_path_buf()));
    }

    // create_dir_all tolerates the directory showing up concurrently.
    fs::create_dir_all(dir).map_err(io_error_with_help("create destination directory", dir))?;
    info!(dir = %dir.display(), "Created destination directory");
    Ok(Some(dir.to_path_buf()))
}

/// Both paths name one file, hard links included.
fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(a), Ok(b)) = (fs::metadata(a), fs::metadata(b)) {
            return a.dev() == b.dev() && a.ino() == b.ino();
        }
    }
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::FsMover;
    use assert_fs::prelude::*;
    use std::cell::RefCell;

    fn never_asked(prompt: &str) -> io::Result<bool> {
        panic!("unexpected prompt: {prompt}");
    }

    /// Records calls instead of moving anything.
    #[derive(Default)]
    struct RecordingMover {
        calls: RefCell<Vec<(PathBuf, PathBuf, bool)>>,
    }

    impl Mover for RecordingMover {
        fn label(&self) -> &'static str {
            "recording"
        }

        fn move_file(&self, s: &Path, d: &Path, overwrite: bool) -> Result<(), RelocateError> {
            self.calls
                .borrow_mut()
                .push((s.to_path_buf(), d.to_path_buf(), overwrite));
            Ok(())
        }
    }

    #[test]
    fn moves_into_existing_directory_keeping_name() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("Experiment 1/file.txt");
        src.write_str("abc").unwrap();
        let dest_dir = temp.child("Experiment 2");
        dest_dir.create_dir_all().unwrap();

        let req = MoveRequest::new(src.path(), dest_dir.path());
        let outcome = relocate(&req, &FsMover, &mut never_asked).unwrap();

        assert_eq!(outcome.destination, dest_dir.path().join("file.txt"));
        dest_dir.child("file.txt").assert("abc");
        assert!(!src.path().exists());
        assert!(!outcome.replaced_existing);
        assert_eq!(outcome.created_dir, None);
    }

    #[test]
    fn missing_source_is_not_found_and_touches_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let req = MoveRequest::new(temp.child("missing.txt").path(), temp.child("out.txt").path())
            .create_dirs(true);
        let mover = RecordingMover::default();

        let err = relocate(&req, &mover, &mut never_asked).unwrap_err();
        assert!(matches!(err, RelocateError::NotFound(ref p) if p.ends_with("missing.txt")));
        assert!(mover.calls.borrow().is_empty());
        assert!(!temp.child("out.txt").path().exists());
    }

    #[test]
    fn directory_source_is_not_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = temp.child("folder");
        dir.create_dir_all().unwrap();
        let req = MoveRequest::new(dir.path(), temp.child("elsewhere").path());

        let err = relocate(&req, &RecordingMover::default(), &mut never_asked).unwrap_err();
        assert!(matches!(err, RelocateError::NotAFile(_)));
        assert!(dir.path().is_dir());
    }

    #[test]
    fn missing_parent_without_create_dirs_creates_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        let dest = temp.child("new").child("deeper").child("a.txt");

        let req = MoveRequest::new(src.path(), dest.path());
        let err = relocate(&req, &FsMover, &mut never_asked).unwrap_err();
        match err {
            RelocateError::MissingDestinationDir(d) => assert_eq!(d, temp.child("new/deeper").path()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!temp.child("new").path().exists());
        src.assert("x");
    }

    #[test]
    fn create_dirs_builds_the_whole_chain() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        let dest = temp.child("new").child("deeper").child("b.txt");

        let req = MoveRequest::new(src.path(), dest.path()).create_dirs(true);
        let outcome = relocate(&req, &FsMover, &mut never_asked).unwrap();

        assert_eq!(outcome.created_dir.as_deref(), Some(temp.child("new/deeper").path()));
        dest.assert("x");
        assert!(!src.path().exists());
    }

    #[test]
    fn declined_overwrite_leaves_both_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("new").unwrap();
        let dest = temp.child("b.txt");
        dest.write_str("old").unwrap();

        let mut asked = Vec::new();
        let mut decline = |p: &str| {
            asked.push(p.to_string());
            Ok::<_, io::Error>(false)
        };
        let mover = RecordingMover::default();
        let err = relocate(&MoveRequest::new(src.path(), dest.path()), &mover, &mut decline).unwrap_err();

        assert!(matches!(err, RelocateError::OperationCancelled(_)));
        assert_eq!(asked, [overwrite_prompt(dest.path())]);
        assert!(mover.calls.borrow().is_empty());
        src.assert("new");
        dest.assert("old");
    }

    #[test]
    fn confirmed_overwrite_replaces_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("new").unwrap();
        let dest = temp.child("b.txt");
        dest.write_str("old").unwrap();

        let mut accept = |_: &str| Ok::<_, io::Error>(true);
        let outcome = relocate(&MoveRequest::new(src.path(), dest.path()), &FsMover, &mut accept).unwrap();

        assert!(outcome.replaced_existing);
        dest.assert("new");
        assert!(!src.path().exists());
    }

    #[test]
    fn force_skips_the_prompt_and_tells_the_mover() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("new").unwrap();
        let dest = temp.child("b.txt");
        dest.write_str("old").unwrap();

        let mover = RecordingMover::default();
        let req = MoveRequest::new(src.path(), dest.path()).force(true);
        relocate(&req, &mover, &mut never_asked).unwrap();

        let calls = mover.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].2, "mover should be allowed to overwrite");
    }

    #[test]
    fn prompt_read_failure_is_unexpected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("new").unwrap();
        let dest = temp.child("b.txt");
        dest.write_str("old").unwrap();

        let mut broken = |_: &str| Err::<bool, _>(io::Error::other("stdin closed"));
        let err = relocate(&MoveRequest::new(src.path(), dest.path()), &FsMover, &mut broken).unwrap_err();
        assert_eq!(err.kind(), "unexpected");
        dest.assert("old");
    }

    #[test]
    fn same_file_is_refused() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("keep").unwrap();

        let req = MoveRequest::new(src.path(), temp.path()).force(true);
        let err = relocate(&req, &FsMover, &mut never_asked).unwrap_err();
        assert!(err.to_string().contains("same file"));
        src.assert("keep");
    }

    #[cfg(unix)]
    #[test]
    fn hard_link_to_source_is_the_same_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("keep").unwrap();
        let dest = temp.child("b.txt");
        fs::hard_link(src.path(), dest.path()).unwrap();

        let mover = RecordingMover::default();
        let req = MoveRequest::new(src.path(), dest.path()).force(true);
        let err = relocate(&req, &mover, &mut never_asked).unwrap_err();
        assert!(err.to_string().contains("same file"));
        assert!(mover.calls.borrow().is_empty());
        src.assert("keep");
        dest.assert("keep");
    }

    #[cfg(unix)]
    #[test]
    fn force_replaces_dangling_symlink() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        let dest = temp.child("b.txt");
        std::os::unix::fs::symlink(temp.child("gone.txt").path(), dest.path()).unwrap();

        let req = MoveRequest::new(src.path(), dest.path()).force(true);
        let outcome = relocate(&req, &FsMover, &mut never_asked).unwrap();

        assert!(outcome.replaced_existing);
        assert!(!fs::symlink_metadata(dest.path()).unwrap().file_type().is_symlink());
        dest.assert("x");
        assert!(!src.path().exists());
        assert!(!temp.child("gone.txt").path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_destination_is_confirmed_first() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        let dest = temp.child("b.txt");
        std::os::unix::fs::symlink(temp.child("gone.txt").path(), dest.path()).unwrap();

        let mut asked = 0;
        let mut decline = |_: &str| {
            asked += 1;
            Ok::<_, io::Error>(false)
        };
        let err = relocate(&MoveRequest::new(src.path(), dest.path()), &FsMover, &mut decline).unwrap_err();

        assert!(matches!(err, RelocateError::OperationCancelled(_)));
        assert_eq!(asked, 1);
        assert!(fs::symlink_metadata(dest.path()).unwrap().file_type().is_symlink());
        src.assert("x");
    }

    #[test]
    fn directory_at_resolved_destination_is_refused() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        temp.child("out/a.txt").create_dir_all().unwrap();

        let req = MoveRequest::new(src.path(), temp.child("out").path());
        let err = relocate(&req, &FsMover, &mut never_asked).unwrap_err();
        assert!(err.to_string().contains("destination is a directory"));
        src.assert("x");
    }

    #[test]
    fn mover_errors_propagate_unchanged() {
        struct Failing;
        impl Mover for Failing {
            fn label(&self) -> &'static str {
                "failing"
            }
            fn move_file(&self, s: &Path, d: &Path, _: bool) -> Result<(), RelocateError> {
                Err(RelocateError::move_failed(s, d, "fatal: not under version control"))
            }
        }

        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("x").unwrap();
        let req = MoveRequest::new(src.path(), temp.child("b.txt").path());

        let err = relocate(&req, &Failing, &mut never_asked).unwrap_err();
        assert!(err.to_string().contains("not under version control"));
        src.assert("x");
    }
}
