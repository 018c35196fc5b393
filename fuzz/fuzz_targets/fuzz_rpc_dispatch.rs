#![no_main]

use libfuzzer_sys::fuzz_target;

use tipline_ledger::{LedgerFacade, Payout, TransferError};
use tipline_types::{AccountHandle, LedgerParams, Timestamp};

struct Sink;

impl Payout for Sink {
    fn transfer(&mut self, _to: &AccountHandle, _amount: u128) -> Result<(), TransferError> {
        Ok(())
    }
}

// Feed arbitrary text to the JSON dispatcher. It must reject, never panic,
// and the tips pool must stay covered by custody.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(admin) = AccountHandle::new("admin") else {
        return;
    };
    let Ok(mut ledger) = LedgerFacade::new(admin, LedgerParams::default(), Sink) else {
        return;
    };

    for (i, line) in text.lines().enumerate() {
        let _ = tipline_rpc::dispatch_json(&mut ledger, line, Timestamp::new(i as u64));
        assert!(ledger.custody_balance() >= ledger.total_tips_pool());
    }
});
