use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use modgraph_util::errors::{ModgraphError, ModgraphResult};

/// File name searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "modgraph.toml";

/// User configuration loaded from `modgraph.toml` or `~/.modgraph/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModgraphConfig {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Tree rendering settings from `[tree]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default, rename = "max-depth")]
    pub max_depth: Option<usize>,
    #[serde(default = "default_show_unresolved", rename = "show-unresolved")]
    pub show_unresolved: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_unresolved: default_show_unresolved(),
        }
    }
}

fn default_show_unresolved() -> bool {
    true
}

/// Logging settings from `[log]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ModgraphConfig {
    /// Load configuration for a working directory.
    ///
    /// Looks for `modgraph.toml` in `cwd` and its ancestors, then for the
    /// global `~/.modgraph/config.toml`, and falls back to defaults.
    pub fn load(cwd: &Path) -> ModgraphResult<Self> {
        if let Some(path) = modgraph_util::fs::find_file_upwards(cwd, CONFIG_FILE_NAME) {
            return Self::from_path(&path);
        }
        let global = Self::global_path();
        if global.is_file() {
            Self::from_path(&global)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> ModgraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModgraphError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> ModgraphResult<Self> {
        toml::from_str(content).map_err(|e| {
            ModgraphError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Returns the path to the global config file.
    pub fn global_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the modgraph data directory (`~/.modgraph/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".modgraph")
}
