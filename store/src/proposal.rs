//! Proposal storage trait.

use crate::StoreError;
use tally_types::{AccountId, Proposal, ProposalId, TokenAmount};

/// Trait for storing proposals and their voter sets.
///
/// Methods take `&self`; backends provide their own interior mutability.
/// Each mutating method must be atomic: either every write it performs is
/// visible afterwards or none is.
pub trait ProposalStore: Send + Sync {
    /// Highest assigned proposal id (equal to the number of proposals).
    fn proposal_count(&self) -> Result<u64, StoreError>;

    /// Store a new proposal and advance the proposal count to its id.
    ///
    /// Fails with [`StoreError::Duplicate`] if the id is already taken.
    fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError>;

    /// Assign the next id (`proposal_count + 1`), store a fresh proposal
    /// under it and advance the count, as one write.
    ///
    /// Concurrent callers sharing the backend always receive distinct,
    /// dense ids. Fails with [`StoreError::Overflow`] once the id space is
    /// exhausted.
    fn create_proposal(&self, description: &str) -> Result<Proposal, StoreError>;

    /// Get a proposal by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError>;

    /// All proposals in id order.
    fn iter_proposals(&self) -> Result<Vec<Proposal>, StoreError>;

    /// Weight recorded for `voter` on proposal `id`, if they voted.
    fn get_vote(&self, id: ProposalId, voter: &AccountId)
        -> Result<Option<TokenAmount>, StoreError>;

    /// Whether `voter` is in the voter set of proposal `id`.
    fn has_voted(&self, id: ProposalId, voter: &AccountId) -> Result<bool, StoreError> {
        self.get_vote(id, voter).map(|v| v.is_some())
    }

    /// Add `voter` to the voter set of proposal `id` and add `weight` to its
    /// tally, as one write. Returns the updated proposal.
    ///
    /// Fails without writing anything when the proposal is missing
    /// ([`StoreError::NotFound`]), the voter is already recorded
    /// ([`StoreError::Duplicate`]) or the tally would overflow
    /// ([`StoreError::Overflow`]).
    fn record_vote(
        &self,
        id: ProposalId,
        voter: &AccountId,
        weight: TokenAmount,
    ) -> Result<Proposal, StoreError>;

    /// Voter set of proposal `id` with recorded weights, sorted by account.
    fn get_votes(&self, id: ProposalId) -> Result<Vec<(AccountId, TokenAmount)>, StoreError>;
}
