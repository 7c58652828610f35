//! Parser for `toklint.json` project configuration files

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "toklint.json";

/// Project-level lint configuration.
///
/// ```json
/// {
///   "roots": ["src"],
///   "disabledLinters": ["no-trailing-whitespace"],
///   "ruleOptions": {
///     "comma-spacing": { "before": false, "after": true }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Directories to lint, relative to the project root
    pub roots: Vec<String>,

    /// Rules to disable globally
    pub disabled_linters: Vec<String>,

    /// Per-rule options, keyed by rule name. Each value is handed verbatim
    /// to the rule's own options type, which decides what it accepts.
    pub rule_options: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProjectConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn is_linter_enabled(&self, name: &str) -> bool {
        !self.disabled_linters.iter().any(|d| d == name)
    }

    /// Raw options value for a rule, if the config carries one.
    pub fn options_for(&self, name: &str) -> Option<&serde_json::Value> {
        self.rule_options.get(name)
    }
}
