//! Deficit reduction planning.
//!
//! Positive balances in the credit class the supplier chose on its latest
//! assessed model-year report pay down outstanding deficits, oldest model
//! year first. Planning is pure; the repository persists the plan.

use std::collections::BTreeSet;

use creditledger_shared::types::{DeficitId, ModelYearReportId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::CreditBalance;

/// The fields of an assessed model-year report the adjuster reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Report id.
    pub id: ModelYearReportId,
    /// Model year name, e.g. "2023".
    pub model_year_name: String,
    /// Credit class code to draw down first.
    pub credit_reduction_selection: Option<String>,
}

/// Picks the governing report among assessed reports: the latest model year.
///
/// On equal model years the first report in `assessed` wins. The repository
/// passes reports oldest-created first.
#[must_use]
pub fn select_governing_report(assessed: Vec<ReportSummary>) -> Option<ReportSummary> {
    assessed.into_iter().reduce(|best, candidate| {
        if candidate.model_year_name > best.model_year_name {
            candidate
        } else {
            best
        }
    })
}

/// Outstanding deficit in the selected credit class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingDeficit {
    /// Deficit row id.
    pub id: DeficitId,
    /// Model year name the deficit was incurred in.
    pub model_year_name: String,
    /// Credits still owed.
    pub credit_value: Decimal,
}

/// One reduction entry to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeficitReduction {
    /// Deficit paid down.
    pub deficit_id: DeficitId,
    /// Model year of the bucket the credits come from.
    pub model_year_id: i32,
    /// Weight class of the bucket the credits come from.
    pub weight_class_id: i32,
    /// Credits consumed.
    pub amount: Decimal,
}

/// Result of a planning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionPlan {
    /// Reduction entries in emission order.
    pub reductions: Vec<DeficitReduction>,
    /// Deficits whose value changed, with their new value.
    pub updated_deficits: Vec<OutstandingDeficit>,
    /// Sum of all reduction amounts.
    pub total_reduction: Decimal,
}

impl ReductionPlan {
    /// True when nothing was reduced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reductions.is_empty()
    }
}

/// Plans reductions of `deficits` from the positive buckets of
/// `credit_class_id`.
///
/// Buckets are visited in the order given (the aggregator's order). Deficits
/// are visited oldest model year first. Each step reduces by the smaller of
/// the bucket's remaining balance and the deficit, so neither goes below
/// zero. Deficits already at zero are skipped.
#[must_use]
pub fn plan_deficit_reductions(
    balances: &[CreditBalance],
    credit_class_id: i32,
    mut deficits: Vec<OutstandingDeficit>,
) -> ReductionPlan {
    deficits.sort_by(|a, b| a.model_year_name.cmp(&b.model_year_name));

    let mut plan = ReductionPlan::default();
    let mut touched = BTreeSet::new();

    for balance in balances
        .iter()
        .filter(|b| b.credit_class_id == credit_class_id)
    {
        let mut remaining = balance.total_value;
        if remaining <= Decimal::ZERO {
            continue;
        }

        for (index, deficit) in deficits.iter_mut().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }
            if deficit.credit_value <= Decimal::ZERO {
                continue;
            }

            let amount = remaining.min(deficit.credit_value);
            remaining -= amount;
            deficit.credit_value -= amount;
            touched.insert(index);

            plan.total_reduction += amount;
            plan.reductions.push(DeficitReduction {
                deficit_id: deficit.id,
                model_year_id: balance.model_year_id,
                weight_class_id: balance.weight_class_id,
                amount,
            });
        }
    }

    plan.updated_deficits = touched
        .into_iter()
        .map(|index| deficits[index].clone())
        .collect();
    plan
}
