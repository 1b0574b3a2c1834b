//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally_types::{AccountId, ProposalId};
use tally_utils::LogFormat;

use crate::config::{ConfigError, TallyConfig};

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Token-weighted governance ledger")]
pub struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the ledger database.
    #[arg(long, env = "TALLY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TALLY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TALLY_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Ledger(LedgerCommand),
    /// Print the default configuration as TOML.
    InitConfig,
}

/// Commands that operate on the ledger database.
#[derive(Debug, Clone, Subcommand)]
pub enum LedgerCommand {
    /// Register a new proposal and print its id.
    Propose {
        /// Free-form description.
        description: String,
    },
    /// Cast a vote weighted by the account's configured balance.
    Vote {
        /// Proposal to vote on.
        proposal: ProposalId,
        /// Voting account.
        #[arg(long)]
        account: AccountId,
    },
    /// Show the description, tally and executed flag of a proposal.
    Show { proposal: ProposalId },
    /// List every proposal.
    List,
    /// List the accounts that voted on a proposal with their recorded weights.
    Voters { proposal: ProposalId },
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn resolve_config(&self) -> Result<TallyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => TallyConfig::from_toml_file(path)?,
            None => TallyConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}
