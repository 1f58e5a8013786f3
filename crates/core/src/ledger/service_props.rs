//! Property-based tests for `PointLedgerService`.
//!
//! - Conservation: final balance = accepted charges - accepted uses
//! - Non-negativity: the balance is >= 0 after every operation
//! - Audit completeness: history length = accepted operation count
//! - Rejection without side effect

use std::sync::Arc;

use proptest::prelude::*;
use tally_shared::types::AccountId;
use tokio::runtime::Runtime;

use super::error::LedgerError;
use super::service::PointLedgerService;

/// One randomly generated caller operation.
#[derive(Debug, Clone, Copy)]
enum Op {
    Charge(i64),
    Use(i64),
}

/// Strategy to generate positive operation amounts.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..=1_000).prop_map(Op::Charge),
        (1i64..=1_000).prop_map(Op::Use),
    ]
}

/// Strategy to generate a sequence of operations.
fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build test runtime")
}

/// Applies `ops` sequentially and returns
/// (final balance, accepted count, model balance, model accepted count).
///
/// The model tracks what a sequential application of the charge/use rules
/// would produce.
fn apply_ops(ops: &[Op]) -> (u64, usize, u64, usize) {
    let rt = runtime();
    rt.block_on(async {
        let service = PointLedgerService::in_memory();
        let account = AccountId::new(1);

        let mut model_balance: u64 = 0;
        let mut model_accepted: usize = 0;

        for op in ops {
            match *op {
                Op::Charge(amount) => {
                    let result = service.charge(account, amount).await;
                    let balance = result.expect("in-range charge must succeed");
                    model_balance += u64::try_from(amount).unwrap();
                    model_accepted += 1;
                    assert_eq!(balance.points, model_balance);
                }
                Op::Use(amount) => {
                    let unsigned = u64::try_from(amount).unwrap();
                    match service.use_points(account, amount).await {
                        Ok(balance) => {
                            assert!(model_balance >= unsigned);
                            model_balance -= unsigned;
                            model_accepted += 1;
                            assert_eq!(balance.points, model_balance);
                        }
                        Err(LedgerError::InsufficientBalance { balance, requested }) => {
                            assert!(model_balance < unsigned);
                            assert_eq!(balance, model_balance);
                            assert_eq!(requested, unsigned);
                        }
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            }
        }

        let final_balance = service.balance(account).await.unwrap().points;
        let history_len = service.history(account).await.unwrap().len();
        (final_balance, history_len, model_balance, model_accepted)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any accepted sequence, the final balance equals the sum of
    /// accepted charges minus the sum of accepted uses, starting from 0,
    /// and every intermediate balance matches the sequential model.
    #[test]
    fn prop_conservation(ops in ops_strategy(40)) {
        let (final_balance, _, model_balance, _) = apply_ops(&ops);
        prop_assert_eq!(final_balance, model_balance);
    }

    /// History grows by exactly one record per accepted operation and by
    /// zero records per rejected operation.
    #[test]
    fn prop_audit_completeness(ops in ops_strategy(40)) {
        let (_, history_len, _, model_accepted) = apply_ops(&ops);
        prop_assert_eq!(history_len, model_accepted);
    }

    /// Replaying the audit trail reproduces the final balance, so the
    /// history is a complete description of every accepted mutation.
    #[test]
    fn prop_history_replays_to_balance(ops in ops_strategy(40)) {
        let rt = runtime();
        let (balance, replayed) = rt.block_on(async {
            let service = PointLedgerService::in_memory();
            let account = AccountId::new(1);
            for op in &ops {
                match *op {
                    Op::Charge(amount) => drop(service.charge(account, amount).await),
                    Op::Use(amount) => drop(service.use_points(account, amount).await),
                }
            }
            let balance = service.balance(account).await.unwrap().points;
            let replayed: i128 = service
                .history(account)
                .await
                .unwrap()
                .iter()
                .map(super::record::TransactionRecord::signed_amount)
                .sum();
            (balance, replayed)
        });
        prop_assert_eq!(i128::from(balance), replayed);
    }

    /// Using more than the current balance is rejected with
    /// `InsufficientBalance` and leaves balance and history untouched.
    #[test]
    fn prop_rejected_use_has_no_side_effect(
        seed in 1i64..=10_000,
        excess in 1i64..=10_000,
    ) {
        let rt = runtime();
        let ok = rt.block_on(async {
            let service = PointLedgerService::in_memory();
            let account = AccountId::new(1);
            service.charge(account, seed).await.unwrap();

            let result = service.use_points(account, seed + excess).await;
            let rejected = matches!(result, Err(LedgerError::InsufficientBalance { .. }));

            let balance = service.balance(account).await.unwrap().points;
            let history_len = service.history(account).await.unwrap().len();
            rejected && balance == u64::try_from(seed).unwrap() && history_len == 1
        });
        prop_assert!(ok);
    }

    /// Non-positive amounts are rejected with `InvalidAmount` by both
    /// operations and never reach the stores.
    #[test]
    fn prop_non_positive_amounts_are_invalid(amount in i64::MIN..=0) {
        let rt = runtime();
        let ok = rt.block_on(async {
            let service = PointLedgerService::in_memory();
            let account = AccountId::new(1);

            let charge = service.charge(account, amount).await;
            let used = service.use_points(account, amount).await;
            let history_len = service.history(account).await.unwrap().len();

            matches!(charge, Err(LedgerError::InvalidAmount { .. }))
                && matches!(used, Err(LedgerError::InvalidAmount { .. }))
                && history_len == 0
        });
        prop_assert!(ok);
    }
}
