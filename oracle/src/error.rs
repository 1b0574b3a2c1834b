use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("balance oracle unavailable: {0}")]
    Unavailable(String),
}
