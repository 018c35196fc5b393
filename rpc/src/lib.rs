//! Entry-point dispatch for the tipline ledger.
//!
//! Decodes named calls into [`LedgerFacade`](tipline_ledger::LedgerFacade) operations:
//! - Journalist registration and withdrawals
//! - Anonymous tip submission (payable)
//! - Account, tip, and source protection queries
//! - Fee administration
//!
//! Unknown method names fail with `FunctionNotFound`; a request with an empty
//! method is a bare deposit and leaves the ledger's accounting untouched.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod pagination;

pub use dispatch::{dispatch, dispatch_json, RpcRequest, ENTRY_POINTS};
pub use error::RpcError;
