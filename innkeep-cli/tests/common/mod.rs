//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory, so tests never touch
//! `~/.innkeep` and can run in parallel.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created;
    /// `init` or auto-init does that.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("innkeep-data");
        Self { temp_dir, data_dir }
    }

    /// Create an environment initialized with the inn's two rooms.
    pub fn with_rooms() -> Self {
        let env = Self::new();
        env.command()
            .args(["init", "--room", "1:General's Quarters", "--room", "2:Major's Suite"])
            .assert()
            .success();
        env
    }

    /// The innkeep binary without any flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        for var in [
            "INNKEEP_DATA_DIR",
            "INNKEEP_BUSY_TIMEOUT",
            "INNKEEP_LOG_MODE",
            "INNKEEP_OUTPUT_FORMAT",
            "INNKEEP_DISABLE_AUTOINIT",
            "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS",
            "INNKEEP_SESSION_TTL_SECONDS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The innkeep binary pointed at this environment's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("innkeep.db")
    }

    /// The temporary directory root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Book a room and return the reservation id.
    ///
    /// # Panics
    /// Panics if the reserve command fails.
    pub fn reserve(&self, room: &str, checkin: &str, checkout: &str) -> i64 {
        let output = self
            .command()
            .args(reserve_args(room, checkin, checkout))
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a reservation id")
    }

    /// Run a command and return its stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments for a reserve command with fixed guest details.
#[allow(dead_code)]
pub fn reserve_args<'a>(room: &'a str, checkin: &'a str, checkout: &'a str) -> Vec<&'a str> {
    vec![
        "reserve",
        "--room",
        room,
        "--checkin",
        checkin,
        "--checkout",
        checkout,
        "--first-name",
        "Grace",
        "--last-name",
        "Hopper",
        "--email",
        "grace@example.com",
        "--phone",
        "555-0101",
    ]
}
