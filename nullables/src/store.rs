//! Nullable store — thread-safe in-memory storage for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tally_store::{ProposalStore, StoreError};
use tally_types::{AccountId, Proposal, ProposalId, TokenAmount};

#[derive(Default)]
struct Inner {
    proposals: BTreeMap<ProposalId, Proposal>,
    /// Voter set per proposal with the weight each voter contributed.
    votes: HashMap<ProposalId, BTreeMap<AccountId, TokenAmount>>,
    proposal_count: u64,
}

/// An in-memory proposal store for testing.
///
/// All state sits behind one mutex, so every trait method is atomic.
/// Writes can be made to fail to exercise backend error paths.
#[derive(Default)]
pub struct NullStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a backend error (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store writes disabled".into()));
        }
        Ok(())
    }
}

impl ProposalStore for NullStore {
    fn proposal_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().proposal_count)
    }

    fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.proposals.contains_key(&proposal.id) {
            return Err(StoreError::Duplicate(format!("proposal {}", proposal.id)));
        }
        inner.proposals.insert(proposal.id, proposal.clone());
        inner.proposal_count = inner.proposal_count.max(proposal.id.raw());
        Ok(())
    }

    fn create_proposal(&self, description: &str) -> Result<Proposal, StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        let id = ProposalId::new(inner.proposal_count)
            .next()
            .ok_or_else(|| StoreError::Overflow("proposal id space".into()))?;
        let proposal = Proposal::new(id, description);
        inner.proposals.insert(id, proposal.clone());
        inner.proposal_count = id.raw();
        Ok(proposal)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        Ok(self.inner.lock().unwrap().proposals.get(&id).cloned())
    }

    fn iter_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        Ok(self.inner.lock().unwrap().proposals.values().cloned().collect())
    }

    fn get_vote(
        &self,
        id: ProposalId,
        voter: &AccountId,
    ) -> Result<Option<TokenAmount>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .votes
            .get(&id)
            .and_then(|set| set.get(voter))
            .copied())
    }

    fn record_vote(
        &self,
        id: ProposalId,
        voter: &AccountId,
        weight: TokenAmount,
    ) -> Result<Proposal, StoreError> {
        self.check_writable()?;
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;

        let proposal = inner
            .proposals
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("proposal {id}")))?;
        let voters = inner.votes.entry(id).or_default();
        if voters.contains_key(voter) {
            return Err(StoreError::Duplicate(format!("vote by {voter} on {id}")));
        }
        let tally = proposal
            .vote_count
            .checked_add(weight)
            .ok_or_else(|| StoreError::Overflow(id.to_string()))?;

        voters.insert(voter.clone(), weight);
        proposal.vote_count = tally;
        Ok(proposal.clone())
    }

    fn get_votes(&self, id: ProposalId) -> Result<Vec<(AccountId, TokenAmount)>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .votes
            .get(&id)
            .map(|set| set.iter().map(|(a, w)| (a.clone(), *w)).collect())
            .unwrap_or_default())
    }
}
