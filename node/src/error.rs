use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] tipline_ledger::LedgerError),

    #[error("rpc error: {0}")]
    Rpc(#[from] tipline_rpc::RpcError),

    #[error("config error: {0}")]
    Config(String),
}
