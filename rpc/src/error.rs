//! RPC error types.

use thiserror::Error;

use tipline_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("journalist not found: {0}")]
    JournalistNotFound(String),

    #[error("tip not found: {0}")]
    TipNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} does not accept value")]
    NotPayable(String),
}

impl From<tipline_types::TypesError> for RpcError {
    fn from(e: tipline_types::TypesError) -> Self {
        RpcError::InvalidRequest(e.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::InvalidRequest(e.to_string())
    }
}
