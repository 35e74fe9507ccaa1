//! Tool configuration, loaded from ~/.readmectl/config.toml.
//!
//! Every key is optional: a missing file or empty table means defaults,
//! so the editor works with zero setup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReadmeError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadmectlConfig {
    /// Directory of extra *.md section templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Default output path for the composed README
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Default session file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<PathBuf>,
}

impl ReadmectlConfig {
    /// Get config file path: ~/.readmectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".readmectl/config.toml")
    }

    /// Load config from the default location; missing file means defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|err| {
            ReadmeError::config(format!("invalid TOML in {}: {err}", path.display()))
        })?;
        config.expand_paths();
        Ok(config)
    }

    /// Save config to a file, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|err| ReadmeError::config(format!("failed to serialize config: {err}")))?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn output_or_default(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from("README.md"))
    }

    pub fn session_or_default(&self) -> PathBuf {
        self.session
            .clone()
            .unwrap_or_else(|| PathBuf::from(".readmectl.json"))
    }

    /// Expand "~" and "${HOME}" in configured paths
    fn expand_paths(&mut self) {
        for path in [&mut self.templates_dir, &mut self.output, &mut self.session]
            .into_iter()
            .flatten()
        {
            *path = expand_home(path);
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    let home = env::var("HOME").unwrap_or_default();

    if let Some(rest) = raw.strip_prefix("~/") {
        if !home.is_empty() {
            return PathBuf::from(&home).join(rest);
        }
    }
    PathBuf::from(raw.replace("${HOME}", &home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = ReadmectlConfig::load_from(Path::new("/no/such/config.toml")).unwrap();
        assert!(config.templates_dir.is_none());
        assert_eq!(config.output_or_default(), PathBuf::from("README.md"));
        assert_eq!(config.session_or_default(), PathBuf::from(".readmectl.json"));
    }

    #[test]
    fn parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = \"docs/README.md\"\n").unwrap();

        let config = ReadmectlConfig::load_from(&path).unwrap();
        assert_eq!(config.output_or_default(), PathBuf::from("docs/README.md"));
        assert!(config.session.is_none());
    }

    #[test]
    fn rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = [broken\n").unwrap();

        let err = ReadmectlConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ReadmeError::Config { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = ReadmectlConfig {
            templates_dir: Some(PathBuf::from("/tmp/templates")),
            output: None,
            session: Some(PathBuf::from("work.json")),
        };
        config.save(&path).unwrap();

        let loaded = ReadmectlConfig::load_from(&path).unwrap();
        assert_eq!(loaded.templates_dir, config.templates_dir);
        assert_eq!(loaded.session, config.session);
    }

    #[test]
    fn expands_home_prefix() {
        assert_eq!(
            expand_home(Path::new("/abs/path.md")),
            PathBuf::from("/abs/path.md")
        );
        let home = env::var("HOME").unwrap_or_default();
        if !home.is_empty() {
            assert_eq!(
                expand_home(Path::new("~/templates")),
                PathBuf::from(&home).join("templates")
            );
            assert_eq!(
                expand_home(Path::new("${HOME}/templates")),
                PathBuf::from(format!("{home}/templates"))
            );
        }
    }
}
