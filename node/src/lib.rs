//! Tipline node: hosts a single ledger instance.
//!
//! The node is the thin shell around the accounting core that:
//! - Loads configuration from TOML
//! - Initialises structured logging
//! - Builds the ledger facade with the configured administrator and fees
//! - Logs every ledger notification
//! - Routes named calls through the RPC dispatcher, one at a time

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::TiplineNode;
