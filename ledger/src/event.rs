//! Notifications emitted by committed ledger operations.

use serde::{Deserialize, Serialize};

use tipline_types::{AccountHandle, ProtectionLevel, SourceId, Timestamp, TipId};

/// Observable ledger notifications. They are never queryable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    JournalistRegistered {
        journalist: AccountHandle,
        name: String,
        timestamp: Timestamp,
    },
    TipSubmitted {
        tip_id: TipId,
        recipient: AccountHandle,
        net_amount: u128,
    },
    TipWithdrawn {
        journalist: AccountHandle,
        amount: u128,
    },
    SourceProtected {
        source_id: SourceId,
        level: ProtectionLevel,
        timestamp: Timestamp,
    },
    PlatformFeeUpdated {
        old_percent: u8,
        new_percent: u8,
    },
    MinimumTipUpdated {
        old_minimum: u128,
        new_minimum: u128,
    },
    PlatformFeesWithdrawn {
        administrator: AccountHandle,
        amount: u128,
    },
    /// Value arrived without a matching entry point.
    DepositReceived {
        from: AccountHandle,
        amount: u128,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners run inline on the emitting call; keep them fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn emit_all(&self, events: &[LedgerEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
