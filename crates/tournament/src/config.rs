// Configuration loading (tournament.toml).

use bracket_core::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TOURNAMENT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "tournament.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding every tournament
    pub store_path: PathBuf,
    /// Format used by `create` when none is given
    pub default_format: Format,
    pub default_max_teams: usize,
    /// Fixed seed for bracket draws. Unset draws from OS entropy.
    pub seed: Option<u64>,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("tournaments.json"),
            default_format: Format::SingleElimination,
            default_max_teams: 16,
            seed: None,
            log_filter: "tournament=info,bracket_core=info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = self.default_format.min_teams();
        if self.default_max_teams < min {
            return Err(ConfigError::Validation {
                field: "default_max_teams".to_string(),
                message: format!(
                    "must be at least {} for {}, got {}",
                    min, self.default_format, self.default_max_teams
                ),
            });
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "store_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load config from `$TOURNAMENT_CONFIG` or `./tournament.toml`.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_from(&path)
}

/// Load and validate config from `path`. A missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&contents, path)?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

fn parse(contents: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn parses_full_file() {
        let toml = r#"
            store_path = "data/cups.json"
            default_format = "double-elimination"
            default_max_teams = 8
            seed = 42
            log_filter = "debug"
        "#;
        let config = parse(toml, Path::new("inline.toml")).unwrap();
        assert_eq!(config.store_path, PathBuf::from("data/cups.json"));
        assert_eq!(config.default_format, Format::DoubleElimination);
        assert_eq!(config.default_max_teams, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = parse("seed = 7", Path::new("inline.toml")).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.default_max_teams, 16);
        assert_eq!(config.default_format, Format::SingleElimination);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = parse("default_format = \"swiss\"", Path::new("inline.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn double_elimination_needs_four_slots() {
        let config = Config {
            default_format: Format::DoubleElimination,
            default_max_teams: 3,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "default_max_teams"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tournament_config_test_missing.toml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join("tournament_config_test_on_disk.toml");
        std::fs::write(&path, "default_max_teams = 32\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.default_max_teams, 32);
        let _ = std::fs::remove_file(&path);
    }
}
