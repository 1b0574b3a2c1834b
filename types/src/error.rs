//! Top-level error type for value parsing.

use thiserror::Error;

/// Errors raised while constructing Tally value types from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TallyError {
    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("invalid proposal id: {0}")]
    InvalidProposalId(String),
}
