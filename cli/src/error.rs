use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("governance error: {0}")]
    Governance(#[from] tally_governance::GovernanceError),

    #[error("store error: {0}")]
    Store(#[from] tally_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] tally_store_lmdb::LmdbError),
}
