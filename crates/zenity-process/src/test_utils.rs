//! Test utilities: a scripted stand-in for the zenity binary
//!
//! The fake is a shell script run through `sh` (configured via
//! `binary_args`), so tests never exec a file they just wrote.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::config::LauncherConfig;
use crate::launcher::Launcher;

/// A temporary shell script that plays the part of zenity.
///
/// The script sees the dialog flags as `"$@"` and the fed records on stdin.
pub struct FakeZenity {
    _dir: TempDir,
    script: PathBuf,
}

impl FakeZenity {
    /// Create a fake whose behaviour is the given `sh` script body
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let script = dir.path().join("zenity.sh");
        std::fs::write(&script, format!("{}\n", body)).expect("failed to write fake zenity");
        Self { _dir: dir, script }
    }

    pub fn script(&self) -> &PathBuf {
        &self.script
    }

    /// Launcher configuration that runs this script
    pub fn config(&self) -> LauncherConfig {
        LauncherConfig::default()
            .with_binary("sh")
            .with_binary_args([self.script.display().to_string()])
    }

    pub fn launcher(&self) -> Launcher {
        Launcher::new(self.config())
    }
}

/// Shorthand for [`FakeZenity::new`]
pub fn fake_zenity(body: &str) -> FakeZenity {
    FakeZenity::new(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_writes_script() {
        let fake = fake_zenity("exit 0");
        let content = std::fs::read_to_string(fake.script()).unwrap();
        assert_eq!(content, "exit 0\n");
    }

    #[test]
    fn test_config_runs_script_through_sh() {
        let fake = fake_zenity("exit 0");
        let config = fake.config();
        assert_eq!(config.binary, PathBuf::from("sh"));
        assert_eq!(config.binary_args.len(), 1);
        assert!(config.binary_args[0].ends_with("zenity.sh"));
    }
}
