//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's only external dependencies are the clock its callers read and
//! the payout rail that moves funds out of custody. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch a real payment system
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod payout;

pub use clock::NullClock;
pub use payout::NullPayout;
