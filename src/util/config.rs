//! Configuration file support for vsselect.
//!
//! Two configuration file locations are consulted:
//! - Global: `~/.vsselect/config.toml` - User-wide defaults
//! - Project: `.vsselect/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [msvs]
//! version = "2012"
//! install_dir = 'D:\VS\2017\Community'
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// vsselect configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visual Studio selection settings
    pub msvs: MsvsConfig,
}

/// Visual Studio selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MsvsConfig {
    /// Version token used when none is given on the command line
    /// (e.g. "2010", "2012e", "auto")
    pub version: Option<String>,

    /// Installation root for Visual Studio 2017, which leaves no
    /// registry trace. `VS_INSTALL_DIR` takes precedence.
    pub install_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.msvs.version.is_some() {
            self.msvs.version = other.msvs.version;
        }
        if other.msvs.install_dir.is_some() {
            self.msvs.install_dir = other.msvs.install_dir;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.vsselect/config.toml)
/// 2. Global config (~/.vsselect/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path.filter(|p| p.exists()) {
        config.merge(Config::load_or_default(global));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global vsselect config directory (~/.vsselect).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".vsselect"))
}

/// Get the global config path (~/.vsselect/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.vsselect/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".vsselect").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.msvs.version.is_none());
        assert!(config.msvs.install_dir.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[msvs]
version = "2010e"
install_dir = "/opt/vs2017"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.msvs.version, Some("2010e".to_string()));
        assert_eq!(config.msvs.install_dir, Some(PathBuf::from("/opt/vs2017")));
    }

    #[test]
    fn test_config_load_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[msvs\nversion = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.msvs.version.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.msvs.version = Some("2008".to_string());
        base.msvs.install_dir = Some(PathBuf::from("/opt/vs"));

        let mut override_cfg = Config::default();
        override_cfg.msvs.version = Some("2012".to_string());

        base.merge(override_cfg);

        assert_eq!(base.msvs.version, Some("2012".to_string()));
        assert_eq!(base.msvs.install_dir, Some(PathBuf::from("/opt/vs"))); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[msvs]
version = "2005"
install_dir = "/opt/global"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[msvs]
version = "2017"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.msvs.version, Some("2017".to_string()));
        assert_eq!(config.msvs.install_dir, Some(PathBuf::from("/opt/global")));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert!(config.msvs.version.is_none());
    }
}
