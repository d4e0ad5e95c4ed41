//! Shared helpers for CLI integration tests.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// An isolated data directory for one test.
pub struct TestEnv {
    data_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        TestEnv {
            data_dir: TempDir::new().unwrap(),
        }
    }

    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// The prohub binary pointed at this environment's data directory.
    pub fn prohub(&self) -> Command {
        let mut cmd = Command::cargo_bin("prohub").unwrap();
        cmd.env("PROHUB_DIR", self.data_path())
            .env_remove("RUST_LOG")
            .env_remove("PROHUB_LOG");
        cmd
    }
}
