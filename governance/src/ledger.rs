//! Core governance ledger — proposal creation, weighted voting and reads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tally_oracle::BalanceOracle;
use tally_store::{ProposalStore, StoreError};
use tally_types::{AccountId, Proposal, ProposalId, ProposalView, TokenAmount};

use crate::error::GovernanceError;

/// The governance ledger.
///
/// Owns nothing global: the balance oracle and the proposal store are bound
/// at construction. Every method takes `&self`, so a ledger can be shared
/// between threads behind an `Arc`.
///
/// Mutations are serialised by `write_lock`, which is held across the whole
/// duplicate check → weight lookup → commit sequence of [`cast_vote`]. The
/// lock only covers this ledger; id assignment and the voter-set check are
/// repeated inside the store's own atomic writes, so ledgers sharing one
/// backend stay consistent. Reads go straight to the store.
///
/// [`cast_vote`]: GovernanceLedger::cast_vote
pub struct GovernanceLedger<O, S> {
    oracle: O,
    store: S,
    write_lock: Mutex<()>,
}

impl<O: BalanceOracle, S: ProposalStore> GovernanceLedger<O, S> {
    pub fn new(oracle: O, store: S) -> Self {
        Self {
            oracle,
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The lock guards no data, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new proposal and return its id.
    ///
    /// The description is stored as given. Ids are assigned densely from 1
    /// by the store, in the same write that stores the proposal.
    pub fn create_proposal(
        &self,
        description: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        let _guard = self.lock();

        let proposal = self
            .store
            .create_proposal(&description.into())
            .map_err(|e| match e {
                StoreError::Overflow(_) => GovernanceError::ProposalIdExhausted,
                other => GovernanceError::Store(other),
            })?;
        let id = proposal.id;

        tracing::info!(
            proposal = id.raw(),
            description_len = proposal.description.len(),
            "proposal created"
        );
        Ok(id)
    }

    /// Cast `caller`'s vote on `proposal_id`, weighted by their current balance.
    ///
    /// Fails without changing anything when the proposal does not exist, the
    /// caller already voted on it, the oracle cannot be read, the caller's
    /// balance is zero, or the weight would overflow the tally.
    pub fn cast_vote(
        &self,
        proposal_id: ProposalId,
        caller: &AccountId,
    ) -> Result<(), GovernanceError> {
        let _guard = self.lock();

        self.ensure_exists(proposal_id)?;

        // Checked before the oracle is consulted.
        if self.store.has_voted(proposal_id, caller)? {
            tracing::debug!(
                proposal = proposal_id.raw(),
                account = %caller,
                "duplicate vote rejected"
            );
            return Err(GovernanceError::AlreadyVoted {
                proposal: proposal_id,
                account: caller.clone(),
            });
        }

        let weight = self.oracle.balance_of(caller).map_err(|e| {
            tracing::warn!(
                oracle = self.oracle.name(),
                account = %caller,
                error = %e,
                "balance lookup failed"
            );
            GovernanceError::OracleUnavailable(e.to_string())
        })?;

        if weight.is_zero() {
            tracing::debug!(
                proposal = proposal_id.raw(),
                account = %caller,
                "zero-weight vote rejected"
            );
            return Err(GovernanceError::NoVotingPower {
                account: caller.clone(),
            });
        }

        let updated = self
            .store
            .record_vote(proposal_id, caller, weight)
            .map_err(|e| match e {
                StoreError::Duplicate(_) => GovernanceError::AlreadyVoted {
                    proposal: proposal_id,
                    account: caller.clone(),
                },
                StoreError::Overflow(_) => GovernanceError::TallyOverflow {
                    proposal: proposal_id,
                },
                StoreError::NotFound(_) => GovernanceError::ProposalNotFound(proposal_id),
                other => GovernanceError::Store(other),
            })?;

        tracing::info!(
            proposal = proposal_id.raw(),
            account = %caller,
            weight = %weight,
            tally = %updated.vote_count,
            "vote cast"
        );
        Ok(())
    }

    /// The `(description, vote_count, executed)` triple of a proposal.
    ///
    /// An id that was never created yields [`ProposalView::default`]; use
    /// [`find_proposal`](Self::find_proposal) to tell the two apart.
    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<ProposalView, GovernanceError> {
        Ok(self
            .store
            .get_proposal(proposal_id)?
            .map(|p| p.view())
            .unwrap_or_default())
    }

    /// The full proposal record, or `None` if the id was never created.
    pub fn find_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Option<Proposal>, GovernanceError> {
        Ok(self.store.get_proposal(proposal_id)?)
    }

    /// Number of proposals ever created (also the highest assigned id).
    pub fn proposal_count(&self) -> Result<u64, GovernanceError> {
        Ok(self.store.proposal_count()?)
    }

    /// All proposals in id order.
    pub fn proposals(&self) -> Result<Vec<Proposal>, GovernanceError> {
        Ok(self.store.iter_proposals()?)
    }

    pub fn has_voted(
        &self,
        proposal_id: ProposalId,
        account: &AccountId,
    ) -> Result<bool, GovernanceError> {
        Ok(self.store.has_voted(proposal_id, account)?)
    }

    /// Weight captured when `account` voted on `proposal_id`.
    pub fn recorded_weight(
        &self,
        proposal_id: ProposalId,
        account: &AccountId,
    ) -> Result<Option<TokenAmount>, GovernanceError> {
        Ok(self.store.get_vote(proposal_id, account)?)
    }

    /// Voter set of a proposal with recorded weights, sorted by account.
    pub fn voters(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Vec<(AccountId, TokenAmount)>, GovernanceError> {
        let mut voters = self.store.get_votes(proposal_id)?;
        voters.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(voters)
    }

    /// Check that a proposal's tally equals the sum of its recorded weights.
    pub fn verify_tally(&self, proposal_id: ProposalId) -> Result<(), GovernanceError> {
        let proposal = self
            .store
            .get_proposal(proposal_id)?
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        let expected: TokenAmount = self
            .store
            .get_votes(proposal_id)?
            .into_iter()
            .map(|(_, weight)| weight)
            .sum();
        if proposal.vote_count != expected {
            return Err(GovernanceError::TallyMismatch {
                proposal: proposal_id,
                recorded: proposal.vote_count,
                expected,
            });
        }
        Ok(())
    }

    fn ensure_exists(&self, proposal_id: ProposalId) -> Result<(), GovernanceError> {
        if !proposal_id.is_valid() || proposal_id.raw() > self.store.proposal_count()? {
            tracing::debug!(proposal = proposal_id.raw(), "vote on unknown proposal rejected");
            return Err(GovernanceError::ProposalNotFound(proposal_id));
        }
        Ok(())
    }
}
