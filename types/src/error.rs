//! Errors raised while constructing or parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("account handle must not be empty")]
    EmptyHandle,

    #[error("invalid hex identifier: {0}")]
    InvalidHex(String),

    #[error("identifier must be 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("unknown protection level {0}")]
    UnknownProtectionLevel(u8),
}
