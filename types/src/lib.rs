//! Fundamental types for the Tally governance ledger.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: account identifiers, proposal ids, token amounts and the
//! proposal record itself.

pub mod account;
pub mod amount;
pub mod error;
pub mod proposal;

pub use account::AccountId;
pub use amount::TokenAmount;
pub use error::TallyError;
pub use proposal::{Proposal, ProposalId, ProposalView};
