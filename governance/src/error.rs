use tally_store::StoreError;
use tally_types::{AccountId, ProposalId, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("account {account} has already voted on proposal {proposal}")]
    AlreadyVoted {
        proposal: ProposalId,
        account: AccountId,
    },

    #[error("account {account} has no voting power")]
    NoVotingPower { account: AccountId },

    #[error("balance oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("vote would overflow the tally of proposal {proposal}")]
    TallyOverflow { proposal: ProposalId },

    #[error("proposal {proposal} tally {recorded} does not match recorded weights {expected}")]
    TallyMismatch {
        proposal: ProposalId,
        recorded: TokenAmount,
        expected: TokenAmount,
    },

    #[error("proposal id space exhausted")]
    ProposalIdExhausted,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
