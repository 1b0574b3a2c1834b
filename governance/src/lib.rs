//! Token-weighted governance ledger.
//!
//! Holders of a fungible balance register proposals and cast votes whose
//! weight equals their balance at the moment they vote.
//!
//! Key principles:
//! - One vote per account per proposal; a recorded vote is never changed.
//! - Weight comes from an injected [`BalanceOracle`](tally_oracle::BalanceOracle),
//!   read once per vote and never re-read.
//! - Tallies only grow.
//!
//! There is no delegation, quorum, execution or voting window: proposals
//! stay open for voting for as long as the ledger exists.

pub mod error;
pub mod ledger;

pub use error::GovernanceError;
pub use ledger::GovernanceLedger;
