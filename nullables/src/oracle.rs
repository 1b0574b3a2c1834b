//! Nullable balance oracle — programmable balances for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tally_oracle::{BalanceOracle, OracleError};
use tally_types::{AccountId, TokenAmount};

/// A balance oracle whose answers are set by the test.
///
/// Balances can be changed at any time (e.g. to simulate a transfer after a
/// vote), the oracle can be switched offline, and every lookup is counted.
#[derive(Default)]
pub struct NullBalanceOracle {
    balances: Mutex<HashMap<AccountId, TokenAmount>>,
    offline: AtomicBool,
    lookups: AtomicUsize,
}

impl NullBalanceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial set of `(account, raw balance)` pairs.
    pub fn with_balances<'a>(balances: impl IntoIterator<Item = (&'a str, u128)>) -> Self {
        let oracle = Self::new();
        for (account, raw) in balances {
            oracle.set_balance(&AccountId::new(account), raw);
        }
        oracle
    }

    /// Set the balance reported for `account`.
    pub fn set_balance(&self, account: &AccountId, raw: u128) {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), TokenAmount::new(raw));
    }

    /// Make every subsequent lookup fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `balance_of` calls made so far, including failed ones.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl BalanceOracle for NullBalanceOracle {
    fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable("null oracle is offline".into()));
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    fn name(&self) -> &str {
        "null-oracle"
    }
}
