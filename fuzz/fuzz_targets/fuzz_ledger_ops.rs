#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tipline_ledger::{LedgerFacade, Payout, TransferError};
use tipline_types::{AccountHandle, LedgerParams, SourceHash, Timestamp};

#[derive(Debug, Arbitrary)]
enum Op {
    Register(u8),
    Tip { to: u8, amount: u64, hash: Option<[u8; 32]> },
    Withdraw { who: u8, amount: u64 },
    Deposit(u64),
    SetFee(u8),
    SetMinimum(u64),
    SweepFees,
    FailPayouts(bool),
}

#[derive(Default)]
struct Rail {
    failing: bool,
}

impl Payout for Rail {
    fn transfer(&mut self, to: &AccountHandle, amount: u128) -> Result<(), TransferError> {
        if self.failing {
            return Err(TransferError {
                recipient: to.clone(),
                amount,
                reason: "declined".into(),
            });
        }
        Ok(())
    }
}

fn who(n: u8) -> AccountHandle {
    AccountHandle::new(format!("j{}", n % 4)).expect("non-empty handle")
}

// Random operation sequences must keep every balance accounted for.
fuzz_target!(|ops: Vec<Op>| {
    let Ok(admin) = AccountHandle::new("admin") else {
        return;
    };
    let Ok(mut ledger) = LedgerFacade::new(admin.clone(), LedgerParams::new(2, 10), Rail::default())
    else {
        return;
    };

    for (i, op) in ops.into_iter().enumerate() {
        let now = Timestamp::new(i as u64);
        let _ = match op {
            Op::Register(n) => ledger
                .register_journalist(&who(n), "N".into(), "O".into(), now)
                .map(|_| ()),
            Op::Tip { to, amount, hash } => ledger
                .submit_anonymous_tip(
                    &admin,
                    &who(to),
                    u128::from(amount),
                    vec![1],
                    hash.map(SourceHash::new),
                    now,
                )
                .map(|_| ()),
            Op::Withdraw { who: n, amount } => ledger
                .withdraw_tips(&who(n), u128::from(amount), now)
                .map(|_| ()),
            Op::Deposit(amount) => ledger.deposit(&admin, u128::from(amount)),
            Op::SetFee(p) => ledger.update_platform_fee(&admin, p),
            Op::SetMinimum(m) => ledger.update_minimum_tip(&admin, u128::from(m)),
            Op::SweepFees => ledger.withdraw_platform_fees(&admin, now).map(|_| ()),
            Op::FailPayouts(f) => {
                ledger.payout_mut().failing = f;
                Ok(())
            }
        };

        let balances = ledger.accounts().total_available();
        assert_eq!(balances, Some(ledger.total_tips_pool()));
        assert!(ledger.custody_balance() >= ledger.total_tips_pool());
        assert!(ledger.params().platform_fee_percent <= 10);
    }
});
