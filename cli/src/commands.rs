//! Command execution against an LMDB-backed ledger.

use std::fmt::Write as _;

use tally_governance::GovernanceLedger;
use tally_oracle::StaticBalanceOracle;
use tally_store_lmdb::{check_integrity, LmdbEnvironment, LmdbProposalStore};

use crate::args::{Command, LedgerCommand};
use crate::config::TallyConfig;
use crate::error::CliError;

/// The ledger the CLI operates on.
pub type CliLedger = GovernanceLedger<StaticBalanceOracle, LmdbProposalStore>;

/// Open (or create) the ledger described by `config`.
///
/// Runs the store integrity check first; problems are logged, not fatal.
pub fn open_ledger(config: &TallyConfig) -> Result<CliLedger, CliError> {
    let oracle = config.balance_oracle()?;
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())?;
    let store = env.proposal_store();

    let report = check_integrity(&store)?;
    for problem in &report.errors {
        tracing::warn!("integrity: {problem}");
    }

    tracing::debug!(
        data_dir = %config.data_dir.display(),
        accounts = oracle.len(),
        proposals = report.proposals_checked,
        "ledger opened"
    );
    Ok(GovernanceLedger::new(oracle, store))
}

/// Run one command and return what should be printed.
///
/// `init-config` never touches the data directory; every other command opens
/// the ledger first.
pub fn run(config: &TallyConfig, command: &Command) -> Result<String, CliError> {
    match command {
        Command::InitConfig => Ok(TallyConfig::default().to_toml_string()),
        Command::Ledger(command) => execute(&open_ledger(config)?, command),
    }
}

/// Run one ledger command against an open ledger.
pub fn execute(ledger: &CliLedger, command: &LedgerCommand) -> Result<String, CliError> {
    let mut out = String::new();
    match command {
        LedgerCommand::Propose { description } => {
            let id = ledger.create_proposal(description.as_str())?;
            writeln!(out, "{}", id.raw()).ok();
        }
        LedgerCommand::Vote { proposal, account } => {
            ledger.cast_vote(*proposal, account)?;
            let view = ledger.get_proposal(*proposal)?;
            writeln!(out, "voted on {proposal}; vote_count = {}", view.vote_count).ok();
        }
        LedgerCommand::Show { proposal } => {
            let view = ledger.get_proposal(*proposal)?;
            let created = proposal.is_valid() && proposal.raw() <= ledger.proposal_count()?;
            writeln!(out, "description: {}", view.description).ok();
            writeln!(out, "vote_count: {}", view.vote_count).ok();
            writeln!(out, "executed: {}", view.executed).ok();
            if !created {
                writeln!(out, "created: false").ok();
            }
        }
        LedgerCommand::List => {
            for p in ledger.proposals()? {
                writeln!(out, "{}\t{}\t{}", p.id.raw(), p.vote_count, p.description).ok();
            }
        }
        LedgerCommand::Voters { proposal } => {
            for (account, weight) in ledger.voters(*proposal)? {
                writeln!(out, "{account}\t{weight}").ok();
            }
        }
    }
    Ok(out)
}
