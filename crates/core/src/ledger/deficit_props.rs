//! Property-based tests for deficit reduction planning.
//!
//! - Property 4: Reductions Stay Within Balance And Deficit
//! - Property 5: Total Reduction Accounting

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::CreditBalance;
use super::deficit::{OutstandingDeficit, plan_deficit_reductions};
use super::types::BalanceKey;
use creditledger_shared::types::DeficitId;

const SELECTED_CLASS: i32 = 1;

/// Strategy to generate signed bucket nets (-500.00 to 1,000.00).
fn net_amount() -> impl Strategy<Value = Decimal> {
    (-50_000i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate owed credits (0.00 to 500.00).
fn owed_amount() -> impl Strategy<Value = Decimal> {
    (0i64..50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn balances() -> impl Strategy<Value = Vec<CreditBalance>> {
    prop::collection::btree_map((1i32..8, 1i32..3), net_amount(), 0..8).prop_map(|nets| {
        nets.into_iter()
            .map(|((model_year_id, credit_class_id), net)| CreditBalance {
                total_value: net,
                ..CreditBalance::empty(BalanceKey::new(model_year_id, credit_class_id, 1))
            })
            .collect()
    })
}

fn deficits() -> impl Strategy<Value = Vec<OutstandingDeficit>> {
    prop::collection::vec((2019i32..2025, owed_amount()), 0..6).prop_map(|rows| {
        rows.into_iter()
            .map(|(year, credit_value)| OutstandingDeficit {
                id: DeficitId::new(),
                model_year_name: year.to_string(),
                credit_value,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 4: Reductions Stay Within Balance And Deficit**
    ///
    /// *For any* balances and deficits, no deficit ends below zero and no
    /// bucket of the selected class is drawn below zero.
    #[test]
    fn prop_reductions_never_overdraw(balances in balances(), deficits in deficits()) {
        let plan = plan_deficit_reductions(&balances, SELECTED_CLASS, deficits.clone());

        for updated in &plan.updated_deficits {
            prop_assert!(updated.credit_value >= Decimal::ZERO);
        }

        let mut drawn: HashMap<i32, Decimal> = HashMap::new();
        for reduction in &plan.reductions {
            prop_assert!(reduction.amount > Decimal::ZERO);
            *drawn.entry(reduction.model_year_id).or_default() += reduction.amount;
        }
        for balance in balances.iter().filter(|b| b.credit_class_id == SELECTED_CLASS) {
            let used = drawn.get(&balance.model_year_id).copied().unwrap_or_default();
            if balance.total_value <= Decimal::ZERO {
                prop_assert_eq!(used, Decimal::ZERO);
            } else {
                prop_assert!(used <= balance.total_value);
            }
        }
    }

    /// **Property 5: Total Reduction Accounting**
    ///
    /// *For any* plan, the total equals the sum of reductions and equals how
    /// much the touched deficits decreased.
    #[test]
    fn prop_total_reduction_matches_deficit_decrease(
        balances in balances(),
        deficits in deficits(),
    ) {
        let before: HashMap<DeficitId, Decimal> =
            deficits.iter().map(|d| (d.id, d.credit_value)).collect();
        let plan = plan_deficit_reductions(&balances, SELECTED_CLASS, deficits);

        let sum: Decimal = plan.reductions.iter().map(|r| r.amount).sum();
        prop_assert_eq!(plan.total_reduction, sum);

        let decrease: Decimal = plan
            .updated_deficits
            .iter()
            .map(|d| before[&d.id] - d.credit_value)
            .sum();
        prop_assert_eq!(plan.total_reduction, decrease);
    }
}
