//! Administratively tunable ledger parameters.

use serde::{Deserialize, Serialize};

/// Upper bound on the platform fee, in whole percent.
pub const MAX_PLATFORM_FEE_PERCENT: u8 = 10;

/// Default platform fee, in whole percent.
pub const DEFAULT_PLATFORM_FEE_PERCENT: u8 = 2;

/// Default minimum gross tip, in raw units.
pub const DEFAULT_MINIMUM_TIP: u128 = 1_000;

/// Fee and threshold parameters consulted on every tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Percentage of each gross tip retained by the platform, in `[0, 10]`.
    pub platform_fee_percent: u8,

    /// Gross tips below this many raw units are rejected.
    pub minimum_tip: u128,
}

impl LedgerParams {
    pub fn new(platform_fee_percent: u8, minimum_tip: u128) -> Self {
        Self {
            platform_fee_percent,
            minimum_tip,
        }
    }

    /// Whether the fee lies within the administrative bound.
    pub fn fee_in_bounds(&self) -> bool {
        self.platform_fee_percent <= MAX_PLATFORM_FEE_PERCENT
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            platform_fee_percent: DEFAULT_PLATFORM_FEE_PERCENT,
            minimum_tip: DEFAULT_MINIMUM_TIP,
        }
    }
}
