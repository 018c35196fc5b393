//! The tipline node: one ledger, its configuration, and its event log.

use tipline_ledger::{LedgerEvent, LedgerFacade, Payout};
use tipline_rpc::RpcRequest;
use tipline_types::Timestamp;

use crate::config::NodeConfig;
use crate::error::NodeError;

pub struct TiplineNode<P> {
    config: NodeConfig,
    ledger: LedgerFacade<P>,
}

impl<P: Payout> TiplineNode<P> {
    /// Build the ledger described by `config`, paying out through `payout`.
    pub fn new(config: NodeConfig, payout: P) -> Result<Self, NodeError> {
        let administrator = config.administrator()?;
        let params = config.ledger_params()?;
        let mut ledger = LedgerFacade::new(administrator, params, payout)?;
        ledger.subscribe(Box::new(log_event));

        tracing::info!(
            administrator = %config.administrator,
            platform_fee_percent = params.platform_fee_percent,
            minimum_tip = params.minimum_tip,
            "tipline node initialised"
        );
        Ok(Self { config, ledger })
    }

    /// Handle one JSON request. Requests are processed strictly one at a time.
    pub fn handle_json(&mut self, request: &str, now: Timestamp) -> Result<String, NodeError> {
        Ok(tipline_rpc::dispatch_json(&mut self.ledger, request, now)?)
    }

    /// Handle one decoded request.
    pub fn handle(
        &mut self,
        request: RpcRequest,
        now: Timestamp,
    ) -> Result<serde_json::Value, NodeError> {
        Ok(tipline_rpc::dispatch(&mut self.ledger, request, now)?)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn ledger(&self) -> &LedgerFacade<P> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LedgerFacade<P> {
        &mut self.ledger
    }
}

fn log_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::JournalistRegistered {
            journalist,
            timestamp,
            ..
        } => tracing::info!(event = "JournalistRegistered", %journalist, %timestamp),
        LedgerEvent::TipSubmitted {
            tip_id,
            recipient,
            net_amount,
        } => tracing::info!(event = "TipSubmitted", %tip_id, %recipient, net_amount),
        LedgerEvent::TipWithdrawn { journalist, amount } => {
            tracing::info!(event = "TipWithdrawn", %journalist, amount)
        }
        LedgerEvent::SourceProtected {
            source_id,
            level,
            timestamp,
        } => tracing::info!(event = "SourceProtected", %source_id, %level, %timestamp),
        other => tracing::info!(event = ?other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipline_ledger::TransferError;
    use tipline_types::AccountHandle;

    struct Counter(u128);

    impl Payout for Counter {
        fn transfer(&mut self, _to: &AccountHandle, amount: u128) -> Result<(), TransferError> {
            self.0 += amount;
            Ok(())
        }
    }

    #[test]
    fn node_uses_configured_parameters() {
        let config = NodeConfig {
            administrator: "ops".into(),
            platform_fee_percent: 5,
            minimum_tip: 50,
            ..NodeConfig::default()
        };
        let node = TiplineNode::new(config, Counter(0)).unwrap();
        assert_eq!(node.ledger().params().platform_fee_percent, 5);
        assert_eq!(node.ledger().params().minimum_tip, 50);
        assert_eq!(node.ledger().administrator().as_str(), "ops");
    }

    #[test]
    fn out_of_bounds_fee_refuses_to_start() {
        let config = NodeConfig {
            platform_fee_percent: 11,
            ..NodeConfig::default()
        };
        assert!(matches!(
            TiplineNode::new(config, Counter(0)),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn json_requests_reach_the_ledger() {
        let mut node = TiplineNode::new(NodeConfig::default(), Counter(0)).unwrap();
        let out = node
            .handle_json(
                r#"{"method":"registerJournalist","caller":"alice","params":{"name":"Alice","organization":"OrgX"}}"#,
                Timestamp::new(7),
            )
            .unwrap();
        assert_eq!(out, r#"{"accepted":true}"#);
        assert_eq!(node.ledger().summary().journalists, 1);
    }

    #[test]
    fn malformed_json_is_rpc_error() {
        let mut node = TiplineNode::new(NodeConfig::default(), Counter(0)).unwrap();
        let err = node.handle_json("{not json", Timestamp::new(1)).unwrap_err();
        assert!(matches!(err, NodeError::Rpc(_)));
    }
}
