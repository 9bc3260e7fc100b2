//! Configuration of the split search.
//!
//! [`SearchConfig`] carries every parameter the strategies and the node
//! search read. It can be built fluently, taken from a preset, loaded from
//! a `.json`/`.toml` file and overridden from `CTREE_*` environment
//! variables.

pub mod core;

pub use self::core::{SearchConfig, SearchConfigBuilder};

use crate::core::error::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "ctree-split.toml";

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// TOML configuration format
    #[default]
    Toml,
    /// JSON configuration format
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(SplitError::config(
                "Unsupported config file format. Use .json or .toml",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new(DEFAULT_CONFIG_FILE)).unwrap(), ConfigFormat::Toml);
        assert!(ConfigFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = SearchConfig::cart();
        for name in ["search.json", "search.toml"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(SearchConfig::load_from_file(&path).unwrap(), config);
        }
    }
}
