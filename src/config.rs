//! Guide configuration
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! network = "testnet"
//! sidebar_breakpoint = 100
//! log_file = "btcguide.log"
//! log_filter = "btcguide=debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::network::NetworkSelection;

/// Environment variable naming the config file
pub const CONFIG_ENVVAR: &str = "BTCGUIDE_CONFIG";

fn default_sidebar_breakpoint() -> u16 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuideConfig {
    /// Network selected at startup.
    #[serde(default)]
    pub network: NetworkSelection,

    /// Terminal width (columns) at and above which the sidebar is always shown.
    #[serde(default = "default_sidebar_breakpoint")]
    pub sidebar_breakpoint: u16,

    /// File the TUI writes its logs to. Without it the TUI does not log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// `EnvFilter` directives, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            network: NetworkSelection::default(),
            sidebar_breakpoint: default_sidebar_breakpoint(),
            log_file: None,
            log_filter: default_log_filter(),
        }
    }
}

impl GuideConfig {
    /// Parse a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_serde_toml() {
        let config = r#"
            network = "mainnet"
            sidebar_breakpoint = 80
            log_file = "guide.log"
            log_filter = "btcguide=debug"
        "#;

        let config = toml::from_str::<GuideConfig>(config);
        assert!(
            config.is_ok(),
            "must be able to deserialize config from toml but got: {}",
            config.unwrap_err()
        );

        let config = config.unwrap();
        assert_eq!(config.network, NetworkSelection::Mainnet);
        assert_eq!(config.sidebar_breakpoint, 80);

        let serialized = toml::to_string(&config).unwrap();
        let deserialized = toml::from_str::<GuideConfig>(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = toml::from_str::<GuideConfig>("").unwrap();
        assert_eq!(config, GuideConfig::default());
        assert_eq!(config.network, NetworkSelection::Testnet);
        assert_eq!(config.sidebar_breakpoint, 100);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(toml::from_str::<GuideConfig>("colour = \"blue\"").is_err());
        assert!(toml::from_str::<GuideConfig>("network = \"regtest\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"mainnet\"").unwrap();

        let config = GuideConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.network, NetworkSelection::Mainnet);
        assert_eq!(GuideConfig::load(None).unwrap(), GuideConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GuideConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
