//! Accounting core of the tipline ledger.
//!
//! Journalists register once, anonymous senders tip them, the platform keeps a
//! bounded percentage, and journalists withdraw what remains. Tips may carry a
//! hashed source identity that is recorded as a protection marker.
//!
//! The core is a serial state machine: every operation either commits fully
//! or leaves no trace. Callers are serialized before they reach it.

pub mod accounts;
pub mod error;
pub mod event;
pub mod facade;
pub mod fee;
pub mod payout;
pub mod sources;
pub mod tips;

pub use accounts::{AccountRegistry, JournalistAccount};
pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use facade::{JournalistInfo, LedgerFacade, LedgerSummary, TipInfo};
pub use fee::{split_fee, FeeSplit};
pub use payout::{Payout, TransferError};
pub use sources::{ProtectedSource, SourceProtectionRegistry};
pub use tips::{AnonymousTip, TipLedger, TipReceipt, TipSubmission};
