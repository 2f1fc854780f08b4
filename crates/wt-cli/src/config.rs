//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wt_core::Locale;

/// Environment variables consulted, in order, when no language is configured.
const LANGUAGE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Language tag used to pick day names and messages (e.g. `en-US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Add the hours worked on other days to the estimated exit.
    #[serde(default)]
    pub consider_accumulated: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("wt.db"),
            language: None,
            consider_accumulated: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WT_*)
        figment = figment.merge(Env::prefixed("WT_"));

        figment.extract()
    }

    /// Resolves the locale from the configured language or the environment.
    pub fn locale(&self) -> Locale {
        resolve_locale(self.language.as_deref(), |var| std::env::var(var).ok())
    }
}

/// Picks the configured language, else the first non-empty locale variable.
fn resolve_locale(language: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Locale {
    let tag = language.map(str::to_string).or_else(|| {
        LANGUAGE_VARS
            .iter()
            .filter_map(|var| env(var))
            .find(|value| !value.is_empty())
    });
    Locale::from_tag(tag.as_deref().unwrap_or_default())
}

/// Returns the platform-specific config directory for wt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wt"))
}

/// Returns the platform-specific data directory for wt.
///
/// On Linux: `~/.local/share/wt`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_wt() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "wt");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("wt.db"));
        assert!(!config.consider_accumulated);
        assert!(config.language.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/wt-test.db\"\nlanguage = \"en-GB\"\nconsider_accumulated = true\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/wt-test.db"));
        assert_eq!(config.language.as_deref(), Some("en-GB"));
        assert!(config.consider_accumulated);
        assert_eq!(config.locale(), Locale::En);
    }

    #[test]
    fn test_configured_language_wins() {
        let env = |_: &str| Some("en_US.UTF-8".to_string());
        assert_eq!(resolve_locale(Some("es-AR"), env), Locale::Es);
    }

    #[test]
    fn test_environment_language_fallback() {
        let env = |var: &str| match var {
            "LC_ALL" => Some(String::new()),
            "LANG" => Some("en_US.UTF-8".to_string()),
            _ => None,
        };
        assert_eq!(resolve_locale(None, env), Locale::En);
    }

    #[test]
    fn test_no_language_defaults_to_spanish() {
        assert_eq!(resolve_locale(None, |_| None), Locale::Es);
    }
}
