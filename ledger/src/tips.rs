//! The tip ledger: records tips, applies the platform fee, and moves balances.
//!
//! Operations validate every precondition before their first mutation. The
//! one step that can fail afterwards, the external payout in [`TipLedger::withdraw`],
//! is bracketed by a tentative debit that is reversed when the payout fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tipline_crypto::derive_tip_id;
use tipline_types::{AccountHandle, LedgerParams, ProtectionLevel, SourceHash, SourceId, Timestamp, TipId};

use crate::accounts::AccountRegistry;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::fee::{split_fee, FeeSplit};
use crate::payout::Payout;
use crate::sources::SourceProtectionRegistry;

/// A recorded tip, net of the platform fee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousTip {
    pub tip_id: TipId,
    pub recipient: AccountHandle,
    pub net_amount: u128,
    /// Encrypted by the sender; never interpreted.
    pub message: Vec<u8>,
    pub created_at: Timestamp,
    /// Flips to `true` once the recipient's withdrawals cover this tip. Never flips back.
    pub withdrawn: bool,
}

/// Everything needed to record one tip.
#[derive(Clone, Debug)]
pub struct TipSubmission {
    pub sender: AccountHandle,
    pub recipient: AccountHandle,
    pub gross_amount: u128,
    pub message: Vec<u8>,
    pub source_hash: Option<SourceHash>,
    pub now: Timestamp,
    /// Disambiguates tips derived in the same instant.
    pub nonce: u64,
}

/// Returned to the sender of an accepted tip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipReceipt {
    pub tip_id: TipId,
    pub gross_amount: u128,
    pub platform_fee: u128,
    pub net_amount: u128,
    pub source_id: Option<SourceId>,
}

/// Per-recipient progress through the tip index, oldest first.
#[derive(Clone, Debug, Default)]
struct Settlement {
    /// Index of the first tip not yet flagged withdrawn.
    cursor: usize,
    /// Withdrawn value not yet large enough to cover the tip at `cursor`.
    carry: u128,
    last_withdrawal: Option<Timestamp>,
}

/// A tip that passed every check, ready to commit.
struct PreparedTip {
    tip_id: TipId,
    split: FeeSplit,
    new_pool: u128,
}

/// Settlement state computed before a payout and applied only after it succeeds.
struct SettlementPlan {
    settled: Vec<TipId>,
    cursor: usize,
    carry: u128,
}

#[derive(Clone, Debug, Default)]
pub struct TipLedger {
    tips: HashMap<TipId, AnonymousTip>,
    by_recipient: HashMap<AccountHandle, Vec<TipId>>,
    settlements: HashMap<AccountHandle, Settlement>,
    total_tips_pool: u128,
}

impl TipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every acceptance check for `submission` without recording anything.
    pub fn check_tip(
        &self,
        accounts: &AccountRegistry,
        params: &LedgerParams,
        submission: &TipSubmission,
    ) -> Result<(), LedgerError> {
        self.prepare(accounts, params, submission).map(|_| ())
    }

    fn prepare(
        &self,
        accounts: &AccountRegistry,
        params: &LedgerParams,
        submission: &TipSubmission,
    ) -> Result<PreparedTip, LedgerError> {
        let recipient = &submission.recipient;
        if !accounts.contains(recipient) {
            return Err(LedgerError::RecipientNotRegistered(recipient.clone()));
        }
        if submission.message.is_empty() {
            return Err(LedgerError::EmptyMessage);
        }
        if submission.gross_amount < params.minimum_tip {
            return Err(LedgerError::BelowMinimumTip {
                amount: submission.gross_amount,
                minimum: params.minimum_tip,
            });
        }
        let split = split_fee(submission.gross_amount, params.platform_fee_percent)?;

        let tip_id = derive_tip_id(
            &submission.sender,
            recipient,
            submission.now,
            submission.nonce,
            &submission.message,
        );
        if self.tips.contains_key(&tip_id) {
            return Err(LedgerError::DuplicateTipId(tip_id));
        }
        let new_pool = self
            .total_tips_pool
            .checked_add(split.net)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        accounts.can_credit(recipient, split.net)?;

        Ok(PreparedTip {
            tip_id,
            split,
            new_pool,
        })
    }

    /// Record a tip, credit the recipient, and optionally protect its source.
    ///
    /// Events are appended to `events` only when the tip is accepted.
    pub fn submit_tip(
        &mut self,
        accounts: &mut AccountRegistry,
        sources: &mut SourceProtectionRegistry,
        params: &LedgerParams,
        submission: TipSubmission,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<TipReceipt, LedgerError> {
        let PreparedTip {
            tip_id,
            split,
            new_pool,
        } = self.prepare(accounts, params, &submission)?;
        let TipSubmission {
            recipient,
            gross_amount,
            message,
            source_hash,
            now,
            ..
        } = submission;

        // Commit.
        accounts.credit(&recipient, split.net)?;
        self.total_tips_pool = new_pool;
        self.tips.insert(
            tip_id,
            AnonymousTip {
                tip_id,
                recipient: recipient.clone(),
                net_amount: split.net,
                message,
                created_at: now,
                withdrawn: false,
            },
        );
        self.by_recipient
            .entry(recipient.clone())
            .or_default()
            .push(tip_id);

        let source_id = match source_hash {
            Some(hash) if !hash.is_zero() => {
                let source_id = sources.protect(hash, ProtectionLevel::High, now);
                events.push(LedgerEvent::SourceProtected {
                    source_id,
                    level: ProtectionLevel::High,
                    timestamp: now,
                });
                Some(source_id)
            }
            _ => None,
        };

        events.push(LedgerEvent::TipSubmitted {
            tip_id,
            recipient,
            net_amount: split.net,
        });

        Ok(TipReceipt {
            tip_id,
            gross_amount,
            platform_fee: split.fee,
            net_amount: split.net,
            source_id,
        })
    }

    /// Withdraw `requested` (or everything, when zero) to the journalist via `payout`.
    ///
    /// Two-phase: the balance and pool are debited, the payout runs, and the
    /// debit is reversed if the payout fails.
    pub fn withdraw<P: Payout + ?Sized>(
        &mut self,
        accounts: &mut AccountRegistry,
        handle: &AccountHandle,
        requested: u128,
        now: Timestamp,
        payout: &mut P,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<u128, LedgerError> {
        let available = accounts
            .get(handle)
            .ok_or_else(|| LedgerError::NotRegistered(handle.clone()))?
            .available_balance;
        if available == 0 {
            return Err(LedgerError::NoFundsAvailable);
        }
        let amount = match requested {
            0 => available,
            r if r > available => {
                return Err(LedgerError::InsufficientBalance {
                    needed: r,
                    available,
                })
            }
            r => r,
        };
        let new_pool = self
            .total_tips_pool
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let plan = self.plan_settlement(handle, amount);

        // Phase 1: tentative debit.
        accounts.debit(handle, amount)?;
        let old_pool = self.total_tips_pool;
        self.total_tips_pool = new_pool;

        // Phase 2: commit or roll back.
        if let Err(e) = payout.transfer(handle, amount) {
            accounts.reverse_debit(handle, amount)?;
            self.total_tips_pool = old_pool;
            return Err(LedgerError::TransferFailed(e));
        }
        self.apply_settlement(handle, plan, now);

        events.push(LedgerEvent::TipWithdrawn {
            journalist: handle.clone(),
            amount,
        });
        Ok(amount)
    }

    fn plan_settlement(&self, handle: &AccountHandle, amount: u128) -> SettlementPlan {
        let (mut cursor, carry) = self
            .settlements
            .get(handle)
            .map(|s| (s.cursor, s.carry))
            .unwrap_or_default();
        let mut carry = carry.saturating_add(amount);
        let mut settled = Vec::new();
        let index = self.by_recipient.get(handle).map(Vec::as_slice).unwrap_or(&[]);
        while let Some(tip) = index.get(cursor).and_then(|id| self.tips.get(id)) {
            if tip.net_amount > carry {
                break;
            }
            carry -= tip.net_amount;
            settled.push(tip.tip_id);
            cursor += 1;
        }
        SettlementPlan {
            settled,
            cursor,
            carry,
        }
    }

    fn apply_settlement(&mut self, handle: &AccountHandle, plan: SettlementPlan, now: Timestamp) {
        for tip_id in &plan.settled {
            if let Some(tip) = self.tips.get_mut(tip_id) {
                tip.withdrawn = true;
            }
        }
        let settlement = self.settlements.entry(handle.clone()).or_default();
        settlement.cursor = plan.cursor;
        settlement.carry = plan.carry;
        settlement.last_withdrawal = Some(now);
    }

    pub fn get_tip(&self, tip_id: &TipId) -> Option<&AnonymousTip> {
        self.tips.get(tip_id)
    }

    pub fn tip_count_for(&self, handle: &AccountHandle) -> u64 {
        self.by_recipient
            .get(handle)
            .map_or(0, |ids| ids.len() as u64)
    }

    /// Tip ids received by `handle`, oldest first.
    pub fn tip_ids_for(&self, handle: &AccountHandle) -> &[TipId] {
        self.by_recipient
            .get(handle)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_tips_pool(&self) -> u128 {
        self.total_tips_pool
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    /// Sum of `net_amount` over tips not yet flagged withdrawn.
    pub fn unwithdrawn_total(&self) -> u128 {
        self.tips
            .values()
            .filter(|t| !t.withdrawn)
            .map(|t| t.net_amount)
            .sum()
    }

    /// Withdrawn value of `handle` not yet attributed to a whole tip.
    pub fn unsettled_carry(&self, handle: &AccountHandle) -> u128 {
        self.settlements.get(handle).map_or(0, |s| s.carry)
    }

    pub fn last_withdrawal(&self, handle: &AccountHandle) -> Option<Timestamp> {
        self.settlements.get(handle).and_then(|s| s.last_withdrawal)
    }
}
