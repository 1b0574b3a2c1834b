//! LMDB storage backend for the Tally governance ledger.
//!
//! Implements the storage traits from `tally-store` using the `heed` LMDB
//! bindings. Each logical store maps to one or more LMDB databases within a
//! single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod proposal;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use proposal::LmdbProposalStore;
