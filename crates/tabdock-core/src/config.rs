//! Container configuration

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database holding the persisted selection
    pub database_path: PathBuf,
    /// Key the selected index is persisted under; restoration is off when unset
    pub restoration_key: Option<String>,
    /// Selection used until a restored or explicit one is applied
    pub initial_index: usize,
    /// Global switch for page and highlight animations
    pub animate_transitions: bool,
    /// Bottom inset reserved for a visible bar
    pub bar_height: f64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("tabdock.db"),
            restoration_key: Some("tabdock.selected_index".to_string()),
            initial_index: 0,
            animate_transitions: true,
            bar_height: 49.0,
        }
    }

    pub fn data_dir() -> PathBuf {
        platform_data_root(|name| std::env::var_os(name))
            .map(|root| root.join("TabDock"))
            .unwrap_or_else(|| PathBuf::from(".tabdock"))
    }

    /// Load a JSON config file. Absent fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(self.restoration_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(CoreError::Config(
                "restoration_key must not be empty".to_string(),
            ));
        }
        if !self.bar_height.is_finite() || self.bar_height < 0.0 {
            return Err(CoreError::Config(format!(
                "bar_height must be a non-negative number, got {}",
                self.bar_height
            )));
        }
        Ok(())
    }

    pub fn restoration_enabled(&self) -> bool {
        self.restoration_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

/// Per-user data root for the running platform. `var` looks up an
/// environment variable; empty values count as unset.
fn platform_data_root(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let lookup = |name: &str| var(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    if cfg!(windows) {
        lookup("LOCALAPPDATA")
    } else if cfg!(target_os = "macos") {
        lookup("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        lookup("XDG_DATA_HOME")
            .or_else(|| lookup("HOME").map(|home| home.join(".local").join("share")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/tabdock"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/tabdock/tabdock.db"));
        assert!(config.restoration_enabled());
        assert!(config.animate_transitions);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"initial_index": 2, "restoration_key": null}"#).unwrap();
        assert_eq!(config.initial_index, 2);
        assert!(!config.restoration_enabled());
        assert_eq!(config.bar_height, 49.0);
    }

    #[test]
    fn test_validation() {
        let mut config = Config::new(PathBuf::from("."));
        config.restoration_key = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut config = Config::new(PathBuf::from("."));
        config.bar_height = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/tabdock/config.json");
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_platform_data_root_ignores_empty_vars() {
        let root = platform_data_root(|_| Some(OsString::new()));
        assert_eq!(root, None);
        assert!(!Config::data_dir().as_os_str().is_empty());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_platform_data_root_prefers_xdg() {
        let env = |xdg: Option<&str>| {
            let xdg = xdg.map(OsString::from);
            move |name: &str| match name {
                "XDG_DATA_HOME" => xdg.clone(),
                "HOME" => Some(OsString::from("/home/user")),
                _ => None,
            }
        };

        assert_eq!(
            platform_data_root(env(Some("/data"))),
            Some(PathBuf::from("/data"))
        );
        assert_eq!(
            platform_data_root(env(None)),
            Some(PathBuf::from("/home/user/.local/share"))
        );
    }
}
