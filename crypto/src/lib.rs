//! Cryptographic primitives for the tipline ledger.
//!
//! - **Blake2b-256** for all hashing
//! - Deterministic, domain-separated derivation of tip and source identifiers

pub mod derive;
pub mod hash;

pub use derive::{derive_source_id, derive_tip_id, SOURCE_ID_DOMAIN, TIP_ID_DOMAIN};
pub use hash::{blake2b_256, blake2b_256_multi};
