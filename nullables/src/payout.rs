//! Nullable payout: record transfers without moving funds.

use tipline_ledger::{Payout, TransferError};
use tipline_types::AccountHandle;

/// A payout rail that records every transfer it accepts.
///
/// Can be switched to decline transfers to exercise rollback paths.
#[derive(Debug, Default)]
pub struct NullPayout {
    sent: Vec<(AccountHandle, u128)>,
    failing: bool,
}

impl NullPayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rail that declines every transfer until [`set_failing(false)`](Self::set_failing).
    pub fn failing() -> Self {
        Self {
            sent: Vec::new(),
            failing: true,
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// All accepted transfers, in order.
    pub fn sent(&self) -> &[(AccountHandle, u128)] {
        &self.sent
    }

    /// Sum of everything paid to `recipient`.
    pub fn total_sent_to(&self, recipient: &AccountHandle) -> u128 {
        self.sent
            .iter()
            .filter(|(to, _)| to == recipient)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl Payout for NullPayout {
    fn transfer(&mut self, recipient: &AccountHandle, amount: u128) -> Result<(), TransferError> {
        if self.failing {
            return Err(TransferError {
                recipient: recipient.clone(),
                amount,
                reason: "null payout configured to fail".into(),
            });
        }
        self.sent.push((recipient.clone(), amount));
        Ok(())
    }
}
