// SPDX-License-Identifier: MIT

//! Environment-driven settings
//!
//! `.env` files are loaded by the binary before these are read.

use std::env;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "SWARM_CONFIG";
pub const PROMPTS_DIR_ENV: &str = "SWARM_PROMPTS_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "agents.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Swarm document used when no path is given on the command line
    pub config_path: PathBuf,
    /// Directory of prompt templates, if any
    pub prompts_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config_path = non_empty(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let prompts_dir = non_empty(PROMPTS_DIR_ENV).map(PathBuf::from);

        log::debug!(
            "Settings: config_path={}, prompts_dir={:?}",
            config_path.display(),
            prompts_dir
        );

        Self {
            config_path,
            prompts_dir,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.config_path, PathBuf::from("agents.yaml"));
        assert!(settings.prompts_dir.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (CONFIG_ENV, "configs/finance.yaml"),
            (PROMPTS_DIR_ENV, "prompts"),
        ]);
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(settings.config_path, PathBuf::from("configs/finance.yaml"));
        assert_eq!(settings.prompts_dir, Some(PathBuf::from("prompts")));
    }

    #[test]
    fn test_blank_values_ignored() {
        let settings = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(settings, Settings::default());
    }
}
