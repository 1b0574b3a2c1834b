//! Fixed balance table.

use crate::{BalanceOracle, OracleError};
use std::collections::HashMap;
use tally_types::{AccountId, TokenAmount};

/// An oracle answering from an immutable balance table.
///
/// Built once (typically from configuration) and never changed afterwards.
#[derive(Clone, Debug, Default)]
pub struct StaticBalanceOracle {
    balances: HashMap<AccountId, TokenAmount>,
}

impl StaticBalanceOracle {
    pub fn new(balances: impl IntoIterator<Item = (AccountId, TokenAmount)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
        }
    }

    /// Number of accounts with an explicit entry.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl BalanceOracle for StaticBalanceOracle {
    fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, OracleError> {
        Ok(self
            .balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    fn name(&self) -> &str {
        "static-balances"
    }
}
