//! Property-based tests for transfer planning.
//!
//! - Property 6: Accepted Transfers Fit The Balance
//! - Property 7: Totals Conserve Content

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::CreditBalance;
use super::error::CreditError;
use super::transfer::{TransferLine, plan_transfer};
use super::types::BalanceKey;

/// Strategy to generate positive credit amounts (0.01 to 100.00).
fn credit_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn bucket() -> impl Strategy<Value = BalanceKey> {
    (1i32..4, 1i32..3).prop_map(|(y, c)| BalanceKey::new(y, c, 1))
}

fn balances() -> impl Strategy<Value = Vec<CreditBalance>> {
    prop::collection::btree_map(bucket(), 0i64..20_000i64, 0..6).prop_map(|nets| {
        nets.into_iter()
            .map(|(key, cents)| CreditBalance {
                credit: Decimal::new(cents, 2),
                total_value: Decimal::new(cents, 2),
                ..CreditBalance::empty(key)
            })
            .collect()
    })
}

fn lines() -> impl Strategy<Value = Vec<TransferLine>> {
    prop::collection::vec((bucket(), credit_amount()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .map(|(key, credit_value)| TransferLine { key, credit_value })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 6: Accepted Transfers Fit The Balance**
    ///
    /// *For any* balances and content, the plan succeeds exactly when every
    /// bucket's summed content exists and does not exceed its net.
    #[test]
    fn prop_accepted_transfers_fit(balances in balances(), lines in lines()) {
        let available: BTreeMap<BalanceKey, Decimal> =
            balances.iter().map(|b| (b.key(), b.total_value)).collect();
        let mut requested: BTreeMap<BalanceKey, Decimal> = BTreeMap::new();
        for line in &lines {
            *requested.entry(line.key).or_default() += line.credit_value;
        }
        let fits = requested
            .iter()
            .all(|(key, sum)| available.get(key).is_some_and(|net| sum <= net));

        match plan_transfer(&balances, &lines) {
            Ok(_) => prop_assert!(fits),
            Err(err) => {
                prop_assert!(!fits);
                prop_assert_eq!(err, CreditError::InsufficientCredits);
            }
        }
    }

    /// **Property 7: Totals Conserve Content**
    ///
    /// *For any* accepted transfer, both accumulations sum to the content
    /// total.
    #[test]
    fn prop_totals_conserve_content(balances in balances(), lines in lines()) {
        if let Ok(totals) = plan_transfer(&balances, &lines) {
            let content: Decimal = lines.iter().map(|l| l.credit_value).sum();
            let by_year: Decimal = totals.by_year_and_class.values().copied().sum();
            let by_class: Decimal = totals.by_class.values().copied().sum();
            prop_assert_eq!(by_year, content);
            prop_assert_eq!(by_class, content);
        }
    }
}
