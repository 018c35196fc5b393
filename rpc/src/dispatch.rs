//! Named-call dispatch onto the ledger facade.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tipline_ledger::{LedgerError, LedgerFacade, Payout};
use tipline_types::{AccountHandle, SourceHash, Timestamp, TipId};

use crate::error::RpcError;
use crate::handlers::*;
use crate::pagination::PaginationParams;

/// Every named entry point the dispatcher routes.
pub const ENTRY_POINTS: &[&str] = &[
    "registerJournalist",
    "submitAnonymousTip",
    "withdrawTips",
    "getJournalistInfo",
    "getTipInfo",
    "getJournalistTipsCount",
    "getJournalistTips",
    "isSourceProtected",
    "updatePlatformFee",
    "updateMinimumTip",
    "withdrawPlatformFees",
    "getLedgerSummary",
];

/// A single call into the ledger.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Entry point name. Empty for a bare value transfer.
    #[serde(default)]
    pub method: String,
    /// Handle of the calling party; required by state-changing methods.
    #[serde(default)]
    pub caller: Option<String>,
    /// Value attached to the call, in decimal raw units.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub params: Value,
}

/// Decode a JSON request, dispatch it, and encode the JSON response.
pub fn dispatch_json<P: Payout>(
    ledger: &mut LedgerFacade<P>,
    request: &str,
    now: Timestamp,
) -> Result<String, RpcError> {
    let request: RpcRequest = serde_json::from_str(request)?;
    let response = dispatch(ledger, request, now)?;
    Ok(response.to_string())
}

/// Route `request` to the matching facade operation.
pub fn dispatch<P: Payout>(
    ledger: &mut LedgerFacade<P>,
    request: RpcRequest,
    now: Timestamp,
) -> Result<Value, RpcError> {
    let value = match request.value.as_deref() {
        Some(v) => parse_amount(v)?,
        None => 0,
    };
    let method = request.method.as_str();
    tracing::debug!(method, value, "dispatching call");

    if method.is_empty() {
        let from = require_caller(&request)?;
        ledger.deposit(&from, value)?;
        return respond(AcceptedResponse { accepted: true });
    }
    if !ENTRY_POINTS.contains(&method) {
        tracing::debug!(method, "unknown entry point");
        return Err(LedgerError::FunctionNotFound(method.to_string()).into());
    }
    if value > 0 && method != "submitAnonymousTip" {
        return Err(RpcError::NotPayable(method.to_string()));
    }

    match method {
        "registerJournalist" => {
            let caller = require_caller(&request)?;
            let p: RegisterJournalistRequest = params(request.params)?;
            ledger.register_journalist(&caller, p.name, p.organization, now)?;
            respond(AcceptedResponse { accepted: true })
        }
        "submitAnonymousTip" => {
            let sender = require_caller(&request)?;
            let p: SubmitTipRequest = params(request.params)?;
            let recipient = handle(&p.recipient)?;
            let message = hex::decode(&p.encrypted_message)
                .map_err(|e| RpcError::InvalidRequest(format!("encryptedMessage: {e}")))?;
            let source_hash = p
                .source_hash
                .as_deref()
                .map(SourceHash::from_hex)
                .transpose()?;
            let receipt =
                ledger.submit_anonymous_tip(&sender, &recipient, value, message, source_hash, now)?;
            respond(SubmitTipResponse::from(receipt))
        }
        "withdrawTips" => {
            let caller = require_caller(&request)?;
            let p: AmountRequest = params(request.params)?;
            let amount = ledger.withdraw_tips(&caller, parse_amount(&p.amount)?, now)?;
            respond(AmountResponse {
                amount: amount.to_string(),
            })
        }
        "getJournalistInfo" => {
            let p: JournalistRequest = params(request.params)?;
            let info = ledger
                .journalist_info(&handle(&p.journalist)?)
                .ok_or(RpcError::JournalistNotFound(p.journalist))?;
            respond(JournalistInfoResponse::from(info))
        }
        "getTipInfo" => {
            let p: TipInfoRequest = params(request.params)?;
            let info = ledger
                .tip_info(&TipId::from_hex(&p.tip_id)?)
                .ok_or(RpcError::TipNotFound(p.tip_id))?;
            respond(TipInfoResponse::from(info))
        }
        "getJournalistTipsCount" => {
            let p: JournalistRequest = params(request.params)?;
            let count = ledger.journalist_tips_count(&handle(&p.journalist)?);
            respond(CountResponse { count })
        }
        "getJournalistTips" => {
            let p: JournalistTipsRequest = params(request.params)?;
            let paging = PaginationParams {
                cursor: p.cursor,
                count: p.count,
            };
            let journalist = handle(&p.journalist)?;
            let (page, pagination) = paging.page(ledger.journalist_tip_ids(&journalist));
            respond(JournalistTipsResponse {
                tip_ids: page.iter().map(ToString::to_string).collect(),
                pagination,
            })
        }
        "isSourceProtected" => {
            let p: SourceRequest = params(request.params)?;
            let (active, level) = ledger.is_source_protected(&SourceHash::from_hex(&p.source_hash)?, now);
            respond(SourceProtectionResponse {
                active,
                level: level.as_u8(),
            })
        }
        "updatePlatformFee" => {
            let caller = require_caller(&request)?;
            let p: PlatformFeeRequest = params(request.params)?;
            ledger.update_platform_fee(&caller, p.percent)?;
            respond(AcceptedResponse { accepted: true })
        }
        "updateMinimumTip" => {
            let caller = require_caller(&request)?;
            let p: AmountRequest = params(request.params)?;
            ledger.update_minimum_tip(&caller, parse_amount(&p.amount)?)?;
            respond(AcceptedResponse { accepted: true })
        }
        "withdrawPlatformFees" => {
            let caller = require_caller(&request)?;
            let amount = ledger.withdraw_platform_fees(&caller, now)?;
            respond(AmountResponse {
                amount: amount.to_string(),
            })
        }
        "getLedgerSummary" => respond(SummaryResponse::from(ledger.summary())),
        other => Err(LedgerError::FunctionNotFound(other.to_string()).into()),
    }
}

fn require_caller(request: &RpcRequest) -> Result<AccountHandle, RpcError> {
    let raw = request
        .caller
        .as_deref()
        .ok_or_else(|| RpcError::InvalidRequest(format!("{} requires a caller", request.method)))?;
    handle(raw)
}

fn handle(raw: &str) -> Result<AccountHandle, RpcError> {
    Ok(AccountHandle::new(raw)?)
}

fn params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    Ok(serde_json::from_value(params)?)
}

fn parse_amount(raw: &str) -> Result<u128, RpcError> {
    raw.parse()
        .map_err(|e| RpcError::InvalidRequest(format!("invalid amount {raw:?}: {e}")))
}

fn respond<T: Serialize>(body: T) -> Result<Value, RpcError> {
    Ok(serde_json::to_value(body)?)
}
