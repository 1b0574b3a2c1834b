//! LMDB implementation of ProposalStore.

use heed::{RoTxn, RwTxn};

use tally_store::{ProposalStore, StoreError};
use tally_types::{AccountId, Proposal, ProposalId, TokenAmount};

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

const PROPOSAL_COUNT_KEY: &[u8] = b"proposal_count";

/// Proposal and voter-set storage in LMDB.
///
/// Every mutating call runs in a single write transaction, so a vote's
/// voter entry and its tally update commit together or not at all.
pub struct LmdbProposalStore {
    env: LmdbEnvironment,
}

impl LmdbProposalStore {
    pub fn new(env: LmdbEnvironment) -> Self {
        Self { env }
    }

    fn read_count(&self, txn: &RoTxn) -> Result<u64, StoreError> {
        match self
            .env
            .meta_db
            .get(txn, PROPOSAL_COUNT_KEY)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.try_into().map_err(|_| {
                    StoreError::Corruption(format!(
                        "proposal_count has {} bytes, expected 8",
                        bytes.len()
                    ))
                })?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    /// Store `proposal` and advance the count to its id inside `wtxn`.
    fn write_new_proposal(
        &self,
        wtxn: &mut RwTxn,
        proposal: &Proposal,
    ) -> Result<(), StoreError> {
        let bytes = encode(proposal)?;
        let key = proposal.id.to_be_bytes();
        if self
            .env
            .proposals_db
            .get(wtxn, &key[..])
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(format!("proposal {}", proposal.id)));
        }
        let count = self.read_count(wtxn)?.max(proposal.id.raw());
        self.env
            .proposals_db
            .put(wtxn, &key[..], &bytes[..])
            .map_err(LmdbError::from)?;
        self.env
            .meta_db
            .put(wtxn, PROPOSAL_COUNT_KEY, &count.to_be_bytes()[..])
            .map_err(LmdbError::from)?;
        Ok(())
    }

    fn read_proposal(&self, txn: &RoTxn, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        match self
            .env
            .proposals_db
            .get(txn, &id.to_be_bytes()[..])
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }
}

/// Composite key `id ‖ account` for the votes database.
fn vote_key(id: ProposalId, voter: &AccountId) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + voter.as_bytes().len());
    key.extend_from_slice(&id.to_be_bytes());
    key.extend_from_slice(voter.as_bytes());
    key
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl ProposalStore for LmdbProposalStore {
    fn proposal_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        self.read_count(&rtxn)
    }

    fn insert_proposal(&self, proposal: &Proposal) -> Result<(), StoreError> {
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;
        self.write_new_proposal(&mut wtxn, proposal)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn create_proposal(&self, description: &str) -> Result<Proposal, StoreError> {
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;
        let id = ProposalId::new(self.read_count(&wtxn)?)
            .next()
            .ok_or_else(|| StoreError::Overflow("proposal id space".into()))?;
        let proposal = Proposal::new(id, description);
        self.write_new_proposal(&mut wtxn, &proposal)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(proposal)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        self.read_proposal(&rtxn, id)
    }

    fn iter_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let mut out = Vec::new();
        for entry in self
            .env
            .proposals_db
            .iter(&rtxn)
            .map_err(LmdbError::from)?
        {
            let (_, bytes) = entry.map_err(LmdbError::from)?;
            out.push(decode(bytes)?);
        }
        Ok(out)
    }

    fn get_vote(
        &self,
        id: ProposalId,
        voter: &AccountId,
    ) -> Result<Option<TokenAmount>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        match self
            .env
            .votes_db
            .get(&rtxn, vote_key(id, voter).as_slice())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn record_vote(
        &self,
        id: ProposalId,
        voter: &AccountId,
        weight: TokenAmount,
    ) -> Result<Proposal, StoreError> {
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;

        let mut proposal = self
            .read_proposal(&wtxn, id)?
            .ok_or_else(|| StoreError::NotFound(format!("proposal {id}")))?;

        let key = vote_key(id, voter);
        if self
            .env
            .votes_db
            .get(&wtxn, key.as_slice())
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(format!("vote by {voter} on {id}")));
        }

        proposal.vote_count = proposal
            .vote_count
            .checked_add(weight)
            .ok_or_else(|| StoreError::Overflow(id.to_string()))?;

        self.env
            .votes_db
            .put(&mut wtxn, key.as_slice(), encode(&weight)?.as_slice())
            .map_err(LmdbError::from)?;
        self.env
            .proposals_db
            .put(&mut wtxn, &id.to_be_bytes()[..], encode(&proposal)?.as_slice())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        Ok(proposal)
    }

    fn get_votes(&self, id: ProposalId) -> Result<Vec<(AccountId, TokenAmount)>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let prefix = id.to_be_bytes();
        let mut out = Vec::new();
        for entry in self
            .env
            .votes_db
            .prefix_iter(&rtxn, &prefix[..])
            .map_err(LmdbError::from)?
        {
            let (key, bytes) = entry.map_err(LmdbError::from)?;
            let voter = AccountId::try_from(&key[prefix.len()..])
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            out.push((voter, decode(bytes)?));
        }
        Ok(out)
    }
}
