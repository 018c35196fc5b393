//! Platform fee computation.

use crate::error::LedgerError;

/// A gross tip split into the platform's cut and the recipient's share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: u128,
    pub fee: u128,
    pub net: u128,
}

/// `fee = floor(gross * percent / 100)`, `net = gross - fee`.
pub fn split_fee(gross: u128, percent: u8) -> Result<FeeSplit, LedgerError> {
    let fee = gross
        .checked_mul(u128::from(percent))
        .ok_or(LedgerError::ArithmeticOverflow)?
        / 100;
    let net = gross
        .checked_sub(fee)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    Ok(FeeSplit { gross, fee, net })
}
