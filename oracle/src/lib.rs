//! Balance oracle for vote weighting.
//!
//! The ledger never owns balances. It asks an oracle for an account's
//! balance at the instant a vote is cast and uses that value as the vote's
//! weight. Anything that can answer `balance_of` can back the ledger: a
//! token contract client, a fixed table loaded from config, or a test double.

pub mod error;
pub mod fixed;

pub use error::OracleError;
pub use fixed::StaticBalanceOracle;

use std::sync::Arc;
use tally_types::{AccountId, TokenAmount};

/// Read-only source of token balances.
pub trait BalanceOracle: Send + Sync {
    /// Current balance of `account`. Unknown accounts hold zero.
    fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, OracleError>;

    /// Human-readable name of this oracle.
    fn name(&self) -> &str {
        "balance-oracle"
    }
}

impl<T: BalanceOracle + ?Sized> BalanceOracle for Arc<T> {
    fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, OracleError> {
        (**self).balance_of(account)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: BalanceOracle + ?Sized> BalanceOracle for &T {
    fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, OracleError> {
        (**self).balance_of(account)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
