//! Optional TOML configuration for the CLI.
//!
//! A missing file is not an error — every setting has a built-in fallback.
//! A file that exists but cannot be read or parsed is reported, since
//! silently ignoring a broken config hides user mistakes.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Settings read from `tipsplit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CliConfig {
    /// Database connection string, e.g. `sqlite:tipsplit.db?mode=rwc`.
    pub database: Option<String>,

    /// Tip percentage used by `calc` when `--tip` is not given.
    pub default_tip_percentage: Option<Decimal>,
}

impl CliConfig {
    /// Loads the config from `path`, returning defaults if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_full_config() {
        let config = CliConfig::parse(
            "database = \"sqlite:my-tips.db?mode=rwc\"\ndefault_tip_percentage = 18\n",
        )
        .unwrap();

        assert_eq!(
            config,
            CliConfig {
                database: Some("sqlite:my-tips.db?mode=rwc".to_string()),
                default_tip_percentage: Some(dec!(18)),
            }
        );
    }

    #[test]
    fn parses_fractional_default_tip() {
        let config = CliConfig::parse("default_tip_percentage = 12.5\n").unwrap();

        assert_eq!(config.default_tip_percentage, Some(dec!(12.5)));
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config = CliConfig::parse("").unwrap();

        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn rejects_invalid_toml() {
        let result = CliConfig::parse("database = [not toml");

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = CliConfig::load(Path::new("definitely-missing-tipsplit.toml")).unwrap();

        assert_eq!(config, CliConfig::default());
    }
}
