//! Application configuration.
//!
//! The configuration is a JSON file, by default
//! `$XDG_CONFIG_HOME/wsnamer/config.json`, or the path passed with
//! `--config <path>`.  Every key is optional: a missing file or a minimal
//! `{}` runs with the built-in rule table.
//!
//! # Example
//!
//! ```json
//! {
//!   "rules": [
//!     { "processes": ["docker", "datagrip"], "name": "Database" },
//!     { "processes": ["chrome"], "name": "Web" },
//!     { "requiredProcesses": ["code"], "displayName": "Code" }
//!   ],
//!   "matching": "exact",
//!   "max_depth": 64
//! }
//! ```
//!
//! `rules` replaces the built-in table entirely; order matters, the first
//! matching rule wins.

use crate::extract::DEFAULT_MAX_DEPTH;
use crate::rules::{MatchMode, Rule, RuleError, RuleTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule table in evaluation order.  `None` keeps the built-in table.
    pub rules: Option<Vec<Rule>>,
    /// `"exact"` (default) or `"subset"`.
    pub matching: MatchMode,
    /// Window-tree nesting limit below the workspace root.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: None,
            matching: MatchMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Load and validate configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the rule table, if any, compiles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rules) = &self.rules {
            RuleTable::new(rules.clone())?;
        }
        Ok(())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid rule: {0}")]
    Rule(#[from] RuleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "rules": [
                { "processes": ["docker", "datagrip"], "name": "Database" },
                { "requiredProcesses": ["code"], "displayName": "Code" }
            ],
            "matching": "subset",
            "max_depth": 12
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        let rules = cfg.rules.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], Rule::new(["docker", "datagrip"], "Database"));
        assert_eq!(rules[1], Rule::new(["code"], "Code"));
        assert_eq!(cfg.matching, MatchMode::Subset);
        assert_eq!(cfg.max_depth, 12);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert!(cfg.rules.is_none());
        assert_eq!(cfg.matching, MatchMode::Exact);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn deserialize_partial() {
        let cfg: Config = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(cfg.max_depth, 8);
        assert!(cfg.rules.is_none());
        assert_eq!(cfg.matching, MatchMode::Exact);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "matching": "exact", "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn unknown_matching_mode_is_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "matching": "fuzzy" }"#).is_err());
    }

    #[test]
    fn validate_rejects_rule_without_processes() {
        let cfg: Config =
            serde_json::from_str(r#"{ "rules": [{ "processes": [], "name": "Empty" }] }"#).unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Rule(RuleError::NoProcesses { index: 0, .. }))
        ));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("wsnamer-config-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, r#"{{ "rules": [{{ "processes": ["kitty"], "name": "Term" }}] }}"#).unwrap();
        }
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.rules.unwrap()[0].name, "Term");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let missing = std::env::temp_dir().join("wsnamer-definitely-missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Read { .. })));

        let path = std::env::temp_dir().join(format!("wsnamer-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_file(&path);
    }
}
