//! Checking that the configured dialog binary can actually be started

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use zenity_core::prelude::*;

use crate::config::LauncherConfig;

/// Resolve a binary name or path to an executable file.
///
/// Bare names are looked up in `PATH`; paths must point at an executable.
pub fn resolve_binary(binary: &Path) -> Result<PathBuf> {
    which::which(binary).map_err(|e| Error::launch(binary, e.to_string()))
}

/// Result of probing the configured dialog binary
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    /// Resolved path of the binary, if it was found
    pub binary: Option<PathBuf>,

    /// First line of `--version` output
    pub version: Option<String>,

    /// Why the binary could not be used
    pub problem: Option<String>,
}

impl ToolAvailability {
    /// Probe the binary from `config` (run once, e.g. at startup)
    pub async fn check(config: &LauncherConfig) -> Self {
        let binary = match resolve_binary(&config.binary) {
            Ok(path) => path,
            Err(e) => {
                debug!("dialog binary check failed: {}", e);
                return Self {
                    problem: Some(e.to_string()),
                    ..Default::default()
                };
            }
        };

        let version = Command::new(&binary)
            .args(&config.binary_args)
            .arg("--version")
            .envs(&config.env)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .inspect_err(|e| debug!("{} --version failed: {}", binary.display(), e))
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| {
                String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .map(|line| line.trim().to_string())
            })
            .filter(|line| !line.is_empty());

        Self {
            binary: Some(binary),
            version,
            problem: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    /// User-facing explanation when the binary is unusable
    pub fn unavailable_message(&self) -> Option<String> {
        if self.is_available() {
            return None;
        }
        Some(match &self.problem {
            Some(problem) => format!(
                "Dialog binary unavailable ({}). Install zenity or set ZENITY_BINARY.",
                problem
            ),
            None => "Dialog binary unavailable. Install zenity or set ZENITY_BINARY.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_availability_default() {
        let availability = ToolAvailability::default();
        assert!(!availability.is_available());
        assert!(availability.unavailable_message().is_some());
    }

    #[test]
    fn test_resolve_missing_binary_is_launch_error() {
        let err = resolve_binary(Path::new("definitely-not-a-dialog-binary-xyz")).unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
        assert!(err.is_fatal());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_sh() {
        let path = resolve_binary(Path::new("sh")).unwrap();
        assert!(path.is_absolute());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_reports_missing_binary() {
        let config = LauncherConfig::default().with_binary("/nonexistent/zenity");
        let availability = ToolAvailability::check(&config).await;
        assert!(!availability.is_available());
        assert!(availability
            .unavailable_message()
            .unwrap()
            .contains("ZENITY_BINARY"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_reads_version_line() {
        let config = LauncherConfig::default()
            .with_binary("sh")
            .with_binary_args(["-c", "echo 3.44.0; echo extra", "sh"]);
        let availability = ToolAvailability::check(&config).await;
        assert!(availability.is_available());
        assert_eq!(availability.version.as_deref(), Some("3.44.0"));
        assert!(availability.unavailable_message().is_none());
    }
}
