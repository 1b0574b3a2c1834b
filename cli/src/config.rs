//! CLI configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tally_oracle::StaticBalanceOracle;
use tally_types::{AccountId, TallyError, TokenAmount};
use tally_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid balance entry: {0}")]
    Balance(#[from] TallyError),

    #[error("map_size_mb must be at least 1")]
    MapSize,
}

/// Configuration for the `tally` CLI.
///
/// Loaded from a TOML file via [`TallyConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Every field has a default, so an
/// empty file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Token balances served by the static oracle: `account = amount`.
    /// Accounts not listed hold zero.
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./tally_data")
}

fn default_map_size_mb() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TallyConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("TallyConfig is always serializable to TOML")
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size_mb == 0 {
            return Err(ConfigError::MapSize);
        }
        for account in self.balances.keys() {
            account.parse::<AccountId>()?;
        }
        Ok(())
    }

    /// LMDB map size in bytes.
    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }

    /// Build the balance oracle described by the `[balances]` table.
    pub fn balance_oracle(&self) -> Result<StaticBalanceOracle, ConfigError> {
        let entries = self
            .balances
            .iter()
            .map(|(account, amount)| {
                Ok((account.parse::<AccountId>()?, TokenAmount::new(u128::from(*amount))))
            })
            .collect::<Result<Vec<_>, TallyError>>()?;
        Ok(StaticBalanceOracle::new(entries))
    }
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            balances: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_oracle::BalanceOracle;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = TallyConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = TallyConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = TallyConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.data_dir, PathBuf::from("./tally_data"));
        assert_eq!(config.map_size_mb, 64);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
        assert!(config.balances.is_empty());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            data_dir = "/var/lib/tally"
            log_format = "json"

            [balances]
            alice = 500
            bob = 0
        "#;
        let config = TallyConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tally"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info"); // default

        let oracle = config.balance_oracle().unwrap();
        assert_eq!(
            oracle.balance_of(&AccountId::new("alice")).unwrap(),
            TokenAmount::new(500)
        );
        assert!(oracle.balance_of(&AccountId::new("bob")).unwrap().is_zero());
    }

    #[test]
    fn malformed_account_rejected() {
        let toml = r#"
            [balances]
            "not valid" = 5
        "#;
        let err = TallyConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Balance(_)));
    }

    #[test]
    fn zero_map_size_rejected() {
        let err = TallyConfig::from_toml_str("map_size_mb = 0").unwrap_err();
        assert!(matches!(err, ConfigError::MapSize));
    }

    #[test]
    fn missing_file_returns_read_error() {
        let err = TallyConfig::from_toml_file(Path::new("/nonexistent/tally.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
