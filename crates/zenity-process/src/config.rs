//! Launcher configuration (`~/.config/zenity-launcher/config.toml`)
//!
//! The launcher never reads global state on its own: callers load a
//! [`LauncherConfig`] (from a file, the environment or plain code) and pass
//! it to [`crate::Launcher::new`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zenity_core::prelude::*;

const CONFIG_DIR: &str = "zenity-launcher";
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides [`LauncherConfig::binary`]
pub const BINARY_ENV_VAR: &str = "ZENITY_BINARY";

fn default_binary() -> PathBuf {
    PathBuf::from("zenity")
}

/// How to start the dialog binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LauncherConfig {
    /// Binary name (looked up in PATH) or path
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Arguments placed before the dialog flags, for wrappers such as
    /// `flatpak-spawn --host zenity`
    #[serde(default)]
    pub binary_args: Vec<String>,

    /// Extra environment for the dialog process (e.g. `DISPLAY`)
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Title used when a dialog does not set its own
    #[serde(default)]
    pub default_title: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            binary_args: Vec::new(),
            env: HashMap::new(),
            default_title: None,
        }
    }
}

impl LauncherConfig {
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_binary_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    /// Apply `ZENITY_BINARY` if set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(binary) = std::env::var(BINARY_ENV_VAR) {
            if !binary.trim().is_empty() {
                debug!("{} overrides binary: {}", BINARY_ENV_VAR, binary);
                self.binary = PathBuf::from(binary);
            }
        }
        self
    }
}

/// Default location of the user's config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load configuration, falling back to defaults when the file is missing or
/// unreadable
pub fn load_config(path: &Path) -> LauncherConfig {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return LauncherConfig::default();
    }

    match try_load_config(path) {
        Ok(config) => {
            debug!("Loaded launcher config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Failed to load {:?}: {}", path, e);
            LauncherConfig::default()
        }
    }
}

/// Load configuration from an explicitly requested file; every problem is an
/// error
pub fn try_load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str::<LauncherConfig>(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    if config.binary.as_os_str().is_empty() {
        return Err(Error::config(format!(
            "'binary' must not be empty in {}",
            path.display()
        )));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_binary_is_zenity() {
        let config = LauncherConfig::default();
        assert_eq!(config.binary, PathBuf::from("zenity"));
        assert!(config.binary_args.is_empty());
        assert!(config.default_title.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("nope.toml"));
        assert_eq!(config, LauncherConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
binary = "/opt/bin/qarma"
binary_args = ["--no-markup"]
default_title = "My Tool"

[env]
DISPLAY = ":1"
"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.binary, PathBuf::from("/opt/bin/qarma"));
        assert_eq!(config.binary_args, vec!["--no-markup"]);
        assert_eq!(config.default_title.as_deref(), Some("My Tool"));
        assert_eq!(config.env.get("DISPLAY").map(String::as_str), Some(":1"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "default_title = \"Hi\"\n").unwrap();

        let config = load_config(&path);
        assert_eq!(config.binary, PathBuf::from("zenity"));
        assert_eq!(config.default_title.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_invalid_toml_falls_back_but_strict_load_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "binary = [not toml").unwrap();

        assert_eq!(load_config(&path), LauncherConfig::default());
        assert!(matches!(try_load_config(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn test_strict_load_missing_file() {
        let temp = tempdir().unwrap();
        let err = try_load_config(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_strict_load_rejects_empty_binary() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "binary = \"\"\n").unwrap();
        assert!(matches!(try_load_config(&path), Err(Error::Config { .. })));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var(BINARY_ENV_VAR, "/usr/local/bin/zenity");
        let config = LauncherConfig::default().with_env_overrides();
        std::env::remove_var(BINARY_ENV_VAR);

        assert_eq!(config.binary, PathBuf::from("/usr/local/bin/zenity"));
    }

    #[test]
    #[serial]
    fn test_empty_env_override_is_ignored() {
        std::env::set_var(BINARY_ENV_VAR, "  ");
        let config = LauncherConfig::default().with_env_overrides();
        std::env::remove_var(BINARY_ENV_VAR);

        assert_eq!(config.binary, PathBuf::from("zenity"));
    }
}
