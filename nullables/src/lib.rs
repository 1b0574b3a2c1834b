//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the ledger (the balance oracle and storage) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod oracle;
pub mod store;

pub use oracle::NullBalanceOracle;
pub use store::NullStore;
