//! Abstract storage traits for the Tally governance ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The ledger depends only on the traits.

pub mod error;
pub mod proposal;

pub use error::StoreError;
pub use proposal::ProposalStore;
