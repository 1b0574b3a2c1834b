//! Governance proposals and their identifiers.

use crate::amount::TokenAmount;
use crate::error::TallyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence number of a proposal.
///
/// Ids are assigned densely starting at 1. The value 0 is reserved and never
/// refers to a proposal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProposalId(u64);

impl ProposalId {
    /// The reserved, never-assigned id.
    pub const NONE: Self = Self(0);
    /// The id given to the first proposal a ledger creates.
    pub const FIRST: Self = Self(1);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Whether this id can refer to a proposal at all (i.e. is non-zero).
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The id that follows this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Big-endian encoding, so storage keys sort in id order.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ProposalId {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|e| TallyError::InvalidProposalId(format!("{s}: {e}")))
    }
}

/// A governance proposal.
///
/// The voter set is not carried on the record; stores keep it keyed by
/// `(ProposalId, AccountId)` next to the weight each voter contributed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Free-form text, immutable once created.
    pub description: String,
    /// Sum of the weights recorded for every voter. Only ever increases.
    pub vote_count: TokenAmount,
    /// Always `false`: execution is not part of this ledger.
    pub executed: bool,
}

impl Proposal {
    /// A freshly created proposal with an empty tally.
    pub fn new(id: ProposalId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            vote_count: TokenAmount::ZERO,
            executed: false,
        }
    }

    /// The public read triple for this proposal.
    pub fn view(&self) -> ProposalView {
        ProposalView {
            description: self.description.clone(),
            vote_count: self.vote_count,
            executed: self.executed,
        }
    }
}

/// The `(description, vote_count, executed)` triple returned by proposal reads.
///
/// The `Default` value is the zero-valued triple reported for ids that were
/// never created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub description: String,
    pub vote_count: TokenAmount,
    pub executed: bool,
}

impl ProposalView {
    /// Whether every field holds its zero value.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.vote_count.is_zero() && !self.executed
    }
}
