//! Configuration loading from ifdrift.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for ifdrift.toml.
#[derive(Debug, Deserialize, Default)]
pub struct IfdriftConfig {
    /// Symbol names to ignore in drift reports.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from ifdrift.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<IfdriftConfig>> {
    let path = root.join("ifdrift.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cfg = toml::from_str(&content).context("Invalid ifdrift.toml")?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("ifdrift_config_test")
            .join(format!("{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_config_missing_is_none() {
        let dir = temp_dir("missing");
        assert!(load_config(&dir).unwrap().is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_parses_fields() {
        let dir = temp_dir("full");
        fs::write(
            dir.join("ifdrift.toml"),
            "ignore = [\"main\", \"usage\"]\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let cfg = load_config(&dir).unwrap().unwrap();
        assert_eq!(cfg.ignore, Some(vec!["main".to_string(), "usage".to_string()]));
        assert_eq!(cfg.output.unwrap().format.as_deref(), Some("json"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = temp_dir("invalid");
        fs::write(dir.join("ifdrift.toml"), "ignore = not-a-list\n").unwrap();
        assert!(load_config(&dir).is_err());
        fs::remove_dir_all(&dir).ok();
    }
}
