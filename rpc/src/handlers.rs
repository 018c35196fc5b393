//! RPC request parameters and response bodies.
//!
//! Amounts travel as decimal strings; identifiers and blobs as hex.

use serde::{Deserialize, Serialize};

use tipline_ledger::{JournalistInfo, LedgerSummary, TipInfo, TipReceipt};

use crate::pagination::PaginationMeta;

// ── Journalist ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterJournalistRequest {
    pub name: String,
    pub organization: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistRequest {
    pub journalist: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistInfoResponse {
    pub name: String,
    pub organization: String,
    pub total_tips_received: String,
    pub available_balance: String,
    pub registration_timestamp: u64,
}

impl From<JournalistInfo> for JournalistInfoResponse {
    fn from(info: JournalistInfo) -> Self {
        Self {
            name: info.name,
            organization: info.organization,
            total_tips_received: info.total_tips_received.to_string(),
            available_balance: info.available_balance.to_string(),
            registration_timestamp: info.registered_at.as_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistTipsRequest {
    pub journalist: String,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistTipsResponse {
    pub tip_ids: Vec<String>,
    #[serde(flatten)]
    pub pagination: PaginationMeta,
}

// ── Tips ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTipRequest {
    pub recipient: String,
    /// Hex-encoded ciphertext.
    pub encrypted_message: String,
    #[serde(default)]
    pub source_hash: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTipResponse {
    pub tip_id: String,
    pub net_amount: String,
    pub platform_fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl From<TipReceipt> for SubmitTipResponse {
    fn from(receipt: TipReceipt) -> Self {
        Self {
            tip_id: receipt.tip_id.to_string(),
            net_amount: receipt.net_amount.to_string(),
            platform_fee: receipt.platform_fee.to_string(),
            source_id: receipt.source_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipInfoRequest {
    pub tip_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipInfoResponse {
    pub recipient: String,
    pub net_amount: String,
    pub message: String,
    pub timestamp: u64,
    pub withdrawn: bool,
}

impl From<TipInfo> for TipInfoResponse {
    fn from(info: TipInfo) -> Self {
        Self {
            recipient: info.recipient.to_string(),
            net_amount: info.net_amount.to_string(),
            message: hex::encode(&info.message),
            timestamp: info.timestamp.as_secs(),
            withdrawn: info.withdrawn,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    /// Decimal raw units.
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct AmountResponse {
    pub amount: String,
}

// ── Source protection ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRequest {
    pub source_hash: String,
}

#[derive(Debug, Serialize)]
pub struct SourceProtectionResponse {
    pub active: bool,
    pub level: u8,
}

// ── Administration ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFeeRequest {
    pub percent: u8,
}

#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub journalists: u64,
    pub tips: u64,
    pub protected_sources: u64,
    pub total_tips_pool: String,
    pub custody_balance: String,
    pub platform_fee_percent: u8,
    pub minimum_tip: String,
}

impl From<LedgerSummary> for SummaryResponse {
    fn from(s: LedgerSummary) -> Self {
        Self {
            journalists: s.journalists,
            tips: s.tips,
            protected_sources: s.protected_sources,
            total_tips_pool: s.total_tips_pool.to_string(),
            custody_balance: s.custody_balance.to_string(),
            platform_fee_percent: s.platform_fee_percent,
            minimum_tip: s.minimum_tip.to_string(),
        }
    }
}
