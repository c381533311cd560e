#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch working directory plus an empty config file, so a user's own
/// config never leaks into a test run.
pub struct Workspace {
    pub dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join(".relocate-config.xml");
        fs::write(&config, "<config></config>").expect("write config");
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let p = self.path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&p, contents).expect("write file");
        p
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).expect("read file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    pub fn set_config(&self, xml: &str) {
        fs::write(&self.config, xml).expect("write config");
    }

    /// Command for `bin`, run from inside the workspace.
    pub fn cmd(&self, bin: &str) -> Command {
        let mut cmd = match bin {
            "relocate" => Command::new(assert_cmd::cargo::cargo_bin!("relocate")),
            "relocate-git" => Command::new(assert_cmd::cargo::cargo_bin!("relocate-git")),
            other => panic!("unknown binary {other}"),
        };
        cmd.current_dir(self.path()).env("RELOCATE_CONFIG", &self.config);
        cmd
    }
}

pub fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn stderr_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}
