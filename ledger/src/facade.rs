//! The single entry point into the ledger.
//!
//! [`LedgerFacade`] owns every registry, the global counters, and the payout
//! seam. It authorizes callers, delegates to the registries, and publishes
//! notifications on its [`EventBus`] only after an operation has committed.

use serde::{Deserialize, Serialize};

use tipline_types::{
    AccountHandle, LedgerParams, ProtectionLevel, SourceHash, Timestamp, TipId,
    MAX_PLATFORM_FEE_PERCENT,
};

use crate::accounts::AccountRegistry;
use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::payout::Payout;
use crate::sources::SourceProtectionRegistry;
use crate::tips::{TipLedger, TipReceipt, TipSubmission};

/// Public view of a journalist account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalistInfo {
    pub name: String,
    pub organization: String,
    pub total_tips_received: u128,
    pub available_balance: u128,
    pub registered_at: Timestamp,
}

/// Public view of a recorded tip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipInfo {
    pub recipient: AccountHandle,
    pub net_amount: u128,
    pub message: Vec<u8>,
    pub timestamp: Timestamp,
    pub withdrawn: bool,
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub journalists: u64,
    pub tips: u64,
    pub protected_sources: u64,
    pub total_tips_pool: u128,
    pub custody_balance: u128,
    pub platform_fee_percent: u8,
    pub minimum_tip: u128,
}

pub struct LedgerFacade<P> {
    administrator: AccountHandle,
    params: LedgerParams,
    accounts: AccountRegistry,
    tips: TipLedger,
    sources: SourceProtectionRegistry,
    /// Funds held on behalf of journalists and the platform.
    custody_balance: u128,
    /// Strictly increasing; fed into tip id derivation.
    next_nonce: u64,
    payout: P,
    events: EventBus,
}

impl<P: Payout> LedgerFacade<P> {
    pub fn new(
        administrator: AccountHandle,
        params: LedgerParams,
        payout: P,
    ) -> Result<Self, LedgerError> {
        check_fee(params.platform_fee_percent)?;
        Ok(Self {
            administrator,
            params,
            accounts: AccountRegistry::new(),
            tips: TipLedger::new(),
            sources: SourceProtectionRegistry::new(),
            custody_balance: 0,
            next_nonce: 0,
            payout,
            events: EventBus::new(),
        })
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── State-changing entry points ─────────────────────────────────────

    pub fn register_journalist(
        &mut self,
        caller: &AccountHandle,
        name: String,
        organization: String,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .register(caller.clone(), name, organization, now)
            .inspect_err(|e| tracing::debug!(journalist = %caller, error = %e, "registration rejected"))?;
        let event = LedgerEvent::JournalistRegistered {
            journalist: account.handle.clone(),
            name: account.name.clone(),
            timestamp: now,
        };
        tracing::info!(journalist = %caller, organization = %account.organization, "journalist registered");
        self.events.emit(&event);
        Ok(())
    }

    /// Accept `gross_amount` from `sender` as a tip for `recipient`.
    pub fn submit_anonymous_tip(
        &mut self,
        sender: &AccountHandle,
        recipient: &AccountHandle,
        gross_amount: u128,
        message: Vec<u8>,
        source_hash: Option<SourceHash>,
        now: Timestamp,
    ) -> Result<TipReceipt, LedgerError> {
        let submission = TipSubmission {
            sender: sender.clone(),
            recipient: recipient.clone(),
            gross_amount,
            message,
            source_hash,
            now,
            nonce: self.next_nonce,
        };

        let rejected =
            |e: &LedgerError| tracing::debug!(recipient = %recipient, gross_amount, error = %e, "tip rejected");
        let (new_custody, next_nonce) = self.check_custody(&submission).inspect_err(rejected)?;

        let mut pending = Vec::new();
        let receipt = self
            .tips
            .submit_tip(
                &mut self.accounts,
                &mut self.sources,
                &self.params,
                submission,
                &mut pending,
            )
            .inspect_err(rejected)?;
        self.custody_balance = new_custody;
        self.next_nonce = next_nonce;

        tracing::info!(
            tip_id = %receipt.tip_id,
            recipient = %recipient,
            net_amount = receipt.net_amount,
            platform_fee = receipt.platform_fee,
            protected = receipt.source_id.is_some(),
            "tip submitted"
        );
        self.events.emit_all(&pending);
        Ok(receipt)
    }

    /// Withdraw `amount` to the calling journalist; zero withdraws everything.
    pub fn withdraw_tips(
        &mut self,
        caller: &AccountHandle,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let mut pending = Vec::new();
        let withdrawn = self
            .tips
            .withdraw(
                &mut self.accounts,
                caller,
                amount,
                now,
                &mut self.payout,
                &mut pending,
            )
            .inspect_err(|e| match e {
                LedgerError::TransferFailed(_) => {
                    tracing::warn!(journalist = %caller, error = %e, "payout failed, withdrawal rolled back")
                }
                _ => tracing::debug!(journalist = %caller, error = %e, "withdrawal rejected"),
            })?;
        // custody >= pool >= withdrawn
        self.custody_balance = self.custody_balance.saturating_sub(withdrawn);

        tracing::info!(journalist = %caller, amount = withdrawn, "tips withdrawn");
        self.events.emit_all(&pending);
        Ok(withdrawn)
    }

    /// Accept value that arrived without a matching entry point.
    ///
    /// Only custody grows; no account, tip, or pool is touched.
    pub fn deposit(&mut self, from: &AccountHandle, amount: u128) -> Result<(), LedgerError> {
        self.custody_balance = self
            .custody_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if amount > 0 {
            tracing::info!(from = %from, amount, "unsolicited deposit accepted");
            self.events.emit(&LedgerEvent::DepositReceived {
                from: from.clone(),
                amount,
            });
        }
        Ok(())
    }

    // ── Administration ──────────────────────────────────────────────────

    pub fn update_platform_fee(
        &mut self,
        caller: &AccountHandle,
        new_percent: u8,
    ) -> Result<(), LedgerError> {
        self.authorize(caller)?;
        check_fee(new_percent)?;
        let old_percent = self.params.platform_fee_percent;
        self.params.platform_fee_percent = new_percent;
        tracing::info!(old_percent, new_percent, "platform fee updated");
        self.events.emit(&LedgerEvent::PlatformFeeUpdated {
            old_percent,
            new_percent,
        });
        Ok(())
    }

    pub fn update_minimum_tip(
        &mut self,
        caller: &AccountHandle,
        new_minimum: u128,
    ) -> Result<(), LedgerError> {
        self.authorize(caller)?;
        let old_minimum = self.params.minimum_tip;
        self.params.minimum_tip = new_minimum;
        tracing::info!(old_minimum, new_minimum, "minimum tip updated");
        self.events.emit(&LedgerEvent::MinimumTipUpdated {
            old_minimum,
            new_minimum,
        });
        Ok(())
    }

    /// Sweep custody held beyond the tips pool to the administrator.
    pub fn withdraw_platform_fees(
        &mut self,
        caller: &AccountHandle,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        self.authorize(caller)?;
        let surplus = self.platform_fees_available();
        if surplus == 0 {
            return Err(LedgerError::NoFeesAvailable);
        }
        self.payout
            .transfer(&self.administrator, surplus)
            .inspect_err(|e| tracing::warn!(amount = surplus, error = %e, "platform fee payout failed"))?;
        self.custody_balance -= surplus;
        tracing::info!(amount = surplus, at = %now, "platform fees withdrawn");
        self.events.emit(&LedgerEvent::PlatformFeesWithdrawn {
            administrator: self.administrator.clone(),
            amount: surplus,
        });
        Ok(surplus)
    }

    /// Ledger checks first, then the facade's own counters.
    fn check_custody(&self, submission: &TipSubmission) -> Result<(u128, u64), LedgerError> {
        self.tips.check_tip(&self.accounts, &self.params, submission)?;
        let new_custody = self
            .custody_balance
            .checked_add(submission.gross_amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let next_nonce = self
            .next_nonce
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok((new_custody, next_nonce))
    }

    fn authorize(&self, caller: &AccountHandle) -> Result<(), LedgerError> {
        if *caller != self.administrator {
            tracing::debug!(caller = %caller, "unauthorized administrative call");
            return Err(LedgerError::Unauthorized(caller.clone()));
        }
        Ok(())
    }
}

impl<P> LedgerFacade<P> {
    // ── Read-only queries ───────────────────────────────────────────────

    pub fn journalist_info(&self, handle: &AccountHandle) -> Option<JournalistInfo> {
        self.accounts.get(handle).map(|a| JournalistInfo {
            name: a.name.clone(),
            organization: a.organization.clone(),
            total_tips_received: a.total_tips_received,
            available_balance: a.available_balance,
            registered_at: a.registered_at,
        })
    }

    pub fn tip_info(&self, tip_id: &TipId) -> Option<TipInfo> {
        self.tips.get_tip(tip_id).map(|t| TipInfo {
            recipient: t.recipient.clone(),
            net_amount: t.net_amount,
            message: t.message.clone(),
            timestamp: t.created_at,
            withdrawn: t.withdrawn,
        })
    }

    pub fn journalist_tips_count(&self, handle: &AccountHandle) -> u64 {
        self.tips.tip_count_for(handle)
    }

    pub fn journalist_tip_ids(&self, handle: &AccountHandle) -> &[TipId] {
        self.tips.tip_ids_for(handle)
    }

    /// Only matches when `now` is the timestamp the source was protected at.
    pub fn is_source_protected(&self, hash: &SourceHash, now: Timestamp) -> (bool, ProtectionLevel) {
        self.sources.is_protected(hash, now)
    }

    pub fn platform_fees_available(&self) -> u128 {
        self.custody_balance
            .saturating_sub(self.tips.total_tips_pool())
    }

    pub fn total_tips_pool(&self) -> u128 {
        self.tips.total_tips_pool()
    }

    pub fn custody_balance(&self) -> u128 {
        self.custody_balance
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn administrator(&self) -> &AccountHandle {
        &self.administrator
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            journalists: self.accounts.len() as u64,
            tips: self.tips.len() as u64,
            protected_sources: self.sources.len() as u64,
            total_tips_pool: self.tips.total_tips_pool(),
            custody_balance: self.custody_balance,
            platform_fee_percent: self.params.platform_fee_percent,
            minimum_tip: self.params.minimum_tip,
        }
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn tips(&self) -> &TipLedger {
        &self.tips
    }

    pub fn payout(&self) -> &P {
        &self.payout
    }

    pub fn payout_mut(&mut self) -> &mut P {
        &mut self.payout
    }
}

fn check_fee(percent: u8) -> Result<(), LedgerError> {
    if percent > MAX_PLATFORM_FEE_PERCENT {
        return Err(LedgerError::FeeTooHigh {
            requested: percent,
            maximum: MAX_PLATFORM_FEE_PERCENT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::TransferError;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Wallet {
        fail: bool,
        sent: Vec<(AccountHandle, u128)>,
    }

    impl Payout for Wallet {
        fn transfer(&mut self, to: &AccountHandle, amount: u128) -> Result<(), TransferError> {
            if self.fail {
                return Err(TransferError {
                    recipient: to.clone(),
                    amount,
                    reason: "offline".into(),
                });
            }
            self.sent.push((to.clone(), amount));
            Ok(())
        }
    }

    fn h(s: &str) -> AccountHandle {
        AccountHandle::new(s).unwrap()
    }

    fn ledger() -> LedgerFacade<Wallet> {
        let mut ledger =
            LedgerFacade::new(h("admin"), LedgerParams::new(2, 100), Wallet::default()).unwrap();
        ledger
            .register_journalist(&h("alice"), "Alice".into(), "OrgX".into(), Timestamp::new(1))
            .unwrap();
        ledger
    }

    fn tip(ledger: &mut LedgerFacade<Wallet>, gross: u128) -> TipReceipt {
        ledger
            .submit_anonymous_tip(
                &h("anon"),
                &h("alice"),
                gross,
                b"sealed".to_vec(),
                None,
                Timestamp::new(5),
            )
            .unwrap()
    }

    #[test]
    fn new_rejects_fee_above_bound() {
        let result = LedgerFacade::new(h("admin"), LedgerParams::new(11, 0), Wallet::default());
        assert!(matches!(
            result,
            Err(LedgerError::FeeTooHigh {
                requested: 11,
                maximum: 10
            })
        ));
    }

    #[test]
    fn fee_surplus_goes_to_administrator() {
        let mut ledger = ledger();
        tip(&mut ledger, 1000);
        assert_eq!(ledger.platform_fees_available(), 20);
        let swept = ledger
            .withdraw_platform_fees(&h("admin"), Timestamp::new(6))
            .unwrap();
        assert_eq!(swept, 20);
        assert_eq!(ledger.payout().sent, vec![(h("admin"), 20)]);
        assert_eq!(ledger.custody_balance(), 980);
        assert_eq!(
            ledger.withdraw_platform_fees(&h("admin"), Timestamp::new(7)),
            Err(LedgerError::NoFeesAvailable)
        );
    }

    #[test]
    fn failed_fee_payout_changes_nothing() {
        let mut ledger = ledger();
        tip(&mut ledger, 1000);
        ledger.payout_mut().fail = true;
        let err = ledger
            .withdraw_platform_fees(&h("admin"), Timestamp::new(6))
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed(_)));
        assert_eq!(ledger.platform_fees_available(), 20);
        assert_eq!(ledger.custody_balance(), 1000);
    }

    #[test]
    fn admin_operations_require_administrator() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.update_platform_fee(&h("alice"), 5),
            Err(LedgerError::Unauthorized(h("alice")))
        );
        assert_eq!(
            ledger.update_minimum_tip(&h("alice"), 5),
            Err(LedgerError::Unauthorized(h("alice")))
        );
        assert_eq!(
            ledger.withdraw_platform_fees(&h("alice"), Timestamp::new(1)),
            Err(LedgerError::Unauthorized(h("alice")))
        );
        assert_eq!(ledger.params().platform_fee_percent, 2);
        assert_eq!(ledger.params().minimum_tip, 100);
    }

    #[test]
    fn fee_update_is_bounded() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.update_platform_fee(&h("admin"), 11),
            Err(LedgerError::FeeTooHigh {
                requested: 11,
                maximum: 10
            })
        );
        ledger.update_platform_fee(&h("admin"), 10).unwrap();
        assert_eq!(tip(&mut ledger, 1000).net_amount, 900);
    }

    #[test]
    fn deposit_only_grows_custody() {
        let mut ledger = ledger();
        ledger.deposit(&h("stranger"), 50).unwrap();
        assert_eq!(ledger.total_tips_pool(), 0);
        assert_eq!(ledger.custody_balance(), 50);
        assert_eq!(ledger.summary().tips, 0);
    }

    #[test]
    fn events_follow_commits_only() {
        let mut ledger = ledger();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        ledger.subscribe(Box::new(move |e: &LedgerEvent| s.lock().unwrap().push(e.clone())));

        let rejected = ledger.submit_anonymous_tip(
            &h("anon"),
            &h("alice"),
            10,
            b"x".to_vec(),
            None,
            Timestamp::new(5),
        );
        assert!(rejected.is_err());
        assert!(seen.lock().unwrap().is_empty());

        tip(&mut ledger, 1000);
        ledger.withdraw_tips(&h("alice"), 0, Timestamp::new(9)).unwrap();
        let events = seen.lock().unwrap();
        assert!(matches!(events[0], LedgerEvent::TipSubmitted { net_amount: 980, .. }));
        assert!(matches!(events[1], LedgerEvent::TipWithdrawn { amount: 980, .. }));
    }

    #[test]
    fn rejected_tip_does_not_advance_nonce() {
        let mut ledger = ledger();
        let _ = ledger.submit_anonymous_tip(
            &h("anon"),
            &h("alice"),
            1,
            b"x".to_vec(),
            None,
            Timestamp::new(5),
        );
        let first = tip(&mut ledger, 1000);
        let expected = tipline_crypto::derive_tip_id(
            &h("anon"),
            &h("alice"),
            Timestamp::new(5),
            0,
            b"sealed",
        );
        assert_eq!(first.tip_id, expected);
    }

    #[test]
    fn full_custody_still_reports_recipient_checks_first() {
        let mut ledger = ledger();
        ledger.deposit(&h("stranger"), u128::MAX).unwrap();

        let unknown = ledger.submit_anonymous_tip(
            &h("anon"),
            &h("nobody"),
            1000,
            b"x".to_vec(),
            None,
            Timestamp::new(5),
        );
        assert_eq!(unknown, Err(LedgerError::RecipientNotRegistered(h("nobody"))));

        let overflow = ledger.submit_anonymous_tip(
            &h("anon"),
            &h("alice"),
            1000,
            b"x".to_vec(),
            None,
            Timestamp::new(5),
        );
        assert_eq!(overflow, Err(LedgerError::ArithmeticOverflow));
        assert_eq!(ledger.total_tips_pool(), 0);
        assert_eq!(ledger.summary().tips, 0);
        assert_eq!(ledger.custody_balance(), u128::MAX);
    }
}
