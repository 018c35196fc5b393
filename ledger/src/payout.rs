//! The external fund-transfer seam.
//!
//! Moving value out of custody is the only step the ledger cannot perform
//! itself. Implementations are synchronous: `Ok` means the funds left,
//! `Err` means nothing moved and the ledger rolls its own mutation back.

use thiserror::Error;

use tipline_types::AccountHandle;

/// Failure reported by a [`Payout`] implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("payout of {amount} to {recipient} rejected: {reason}")]
pub struct TransferError {
    pub recipient: AccountHandle,
    pub amount: u128,
    pub reason: String,
}

/// Sends funds held by the ledger to an account.
pub trait Payout {
    fn transfer(&mut self, recipient: &AccountHandle, amount: u128) -> Result<(), TransferError>;
}

impl<P: Payout + ?Sized> Payout for &mut P {
    fn transfer(&mut self, recipient: &AccountHandle, amount: u128) -> Result<(), TransferError> {
        (**self).transfer(recipient, amount)
    }
}

impl<P: Payout + ?Sized> Payout for Box<P> {
    fn transfer(&mut self, recipient: &AccountHandle, amount: u128) -> Result<(), TransferError> {
        (**self).transfer(recipient, amount)
    }
}
