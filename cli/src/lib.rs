//! Operator CLI for a local Tally governance ledger.
//!
//! Wires a [`TallyConfig`] into an LMDB-backed
//! [`GovernanceLedger`](tally_governance::GovernanceLedger) whose
//! balance oracle is the config's `[balances]` table, then runs one command.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;

pub use args::{Cli, Command, LedgerCommand};
pub use commands::{execute, open_ledger, run, CliLedger};
pub use config::{ConfigError, TallyConfig};
pub use error::CliError;

