//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use tipline_types::params::{DEFAULT_MINIMUM_TIP, DEFAULT_PLATFORM_FEE_PERCENT};
use tipline_types::{AccountHandle, LedgerParams, MAX_PLATFORM_FEE_PERCENT};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a tipline node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Handle of the single privileged account. Fixed for the node's lifetime.
    #[serde(default = "default_administrator")]
    pub administrator: String,

    /// Initial platform fee in whole percent, at most 10.
    #[serde(default = "default_platform_fee_percent")]
    pub platform_fee_percent: u8,

    /// Initial minimum gross tip in raw units. TOML integers are 64-bit.
    #[serde(default = "default_minimum_tip")]
    pub minimum_tip: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_administrator() -> String {
    "admin".to_string()
}

fn default_platform_fee_percent() -> u8 {
    DEFAULT_PLATFORM_FEE_PERCENT
}

fn default_minimum_tip() -> u64 {
    u64::try_from(DEFAULT_MINIMUM_TIP).unwrap_or(u64::MAX)
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn administrator(&self) -> Result<AccountHandle, NodeError> {
        AccountHandle::new(self.administrator.as_str())
            .map_err(|e| NodeError::Config(format!("administrator: {e}")))
    }

    /// Validated ledger parameters.
    pub fn ledger_params(&self) -> Result<LedgerParams, NodeError> {
        let params = LedgerParams::new(self.platform_fee_percent, u128::from(self.minimum_tip));
        if !params.fee_in_bounds() {
            return Err(NodeError::Config(format!(
                "platform_fee_percent {} exceeds maximum {}",
                self.platform_fee_percent, MAX_PLATFORM_FEE_PERCENT
            )));
        }
        Ok(params)
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            administrator: default_administrator(),
            platform_fee_percent: default_platform_fee_percent(),
            minimum_tip: default_minimum_tip(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.platform_fee_percent, config.platform_fee_percent);
        assert_eq!(parsed.minimum_tip, config.minimum_tip);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.administrator, "admin");
        assert_eq!(config.platform_fee_percent, 2);
        assert_eq!(config.minimum_tip, 1_000);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            administrator = "ops"
            platform_fee_percent = 5
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.administrator, "ops");
        assert_eq!(config.platform_fee_percent, 5);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn fee_above_bound_is_config_error() {
        let config = NodeConfig::from_toml_str("platform_fee_percent = 11").unwrap();
        assert!(matches!(config.ledger_params(), Err(NodeError::Config(_))));
    }

    #[test]
    fn empty_administrator_is_config_error() {
        let config = NodeConfig::from_toml_str(r#"administrator = """#).unwrap();
        assert!(matches!(config.administrator(), Err(NodeError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/tipline.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
