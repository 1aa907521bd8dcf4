//! Dashboard configuration
//!
//! Read from `<config_dir>/modboard/config.toml` unless a path is given.
//! A missing file means defaults; a malformed one is an error.

use crate::error::CoreError;
use crate::metrics::DEFAULT_TOP_FEATURES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Entries shown in the most-used pattern list
    pub top_features_limit: usize,

    /// Entries shown from each history
    pub history_limit: usize,

    /// Directory names never descended into during analysis
    pub exclude_dirs: Vec<String>,

    /// Default directory for exports when only a file name is given
    pub export_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_features_limit: DEFAULT_TOP_FEATURES,
            history_limit: 20,
            exclude_dirs: ["node_modules", ".git", "dist", "build", "target", "vendor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            export_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Default config location (`~/.config/modboard/config.toml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("modboard").join("config.toml"))
    }

    /// Load from an explicit path or the default location
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CoreError::FileRead {
            path: path.clone(),
            source,
        })?;

        Self::from_toml(&content).map_err(|e| CoreError::InvalidConfig {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve an export target against `export_dir`
    pub fn resolve_export_path(&self, target: &Path) -> PathBuf {
        match &self.export_dir {
            Some(dir) if target.is_relative() && target.parent() == Some(Path::new("")) => {
                dir.join(target)
            }
            _ => target.to_path_buf(),
        }
    }
}
