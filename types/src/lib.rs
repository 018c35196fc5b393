//! Fundamental types for the tipline ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account handles, identifiers, timestamps, protection levels, and ledger parameters.

pub mod error;
pub mod handle;
pub mod hash;
pub mod params;
pub mod protection;
pub mod time;

pub use error::TypesError;
pub use handle::AccountHandle;
pub use hash::{SourceHash, SourceId, TipId};
pub use params::{LedgerParams, MAX_PLATFORM_FEE_PERCENT};
pub use protection::ProtectionLevel;
pub use time::Timestamp;
