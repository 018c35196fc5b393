use thiserror::Error;

use tipline_types::{AccountHandle, TipId};

use crate::payout::TransferError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} is already registered")]
    AlreadyRegistered(AccountHandle),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("account not found: {0}")]
    UnknownAccount(AccountHandle),

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("recipient {0} is not a registered journalist")]
    RecipientNotRegistered(AccountHandle),

    #[error("tip message must not be empty")]
    EmptyMessage,

    #[error("tip below minimum: {amount} < {minimum}")]
    BelowMinimumTip { amount: u128, minimum: u128 },

    #[error("tip id {0} already recorded")]
    DuplicateTipId(TipId),

    #[error("caller {0} is not a registered journalist")]
    NotRegistered(AccountHandle),

    #[error("no funds available to withdraw")]
    NoFundsAvailable,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("caller {0} is not the administrator")]
    Unauthorized(AccountHandle),

    #[error("platform fee {requested}% exceeds maximum {maximum}%")]
    FeeTooHigh { requested: u8, maximum: u8 },

    #[error("no platform fees available")]
    NoFeesAvailable,

    #[error("function not found: {0}")]
    FunctionNotFound(String),
}
