//! Pending transfer balances and the insufficient-credit merge.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::CreditBalance;
use super::types::BalanceKey;

/// One content line of an outgoing transfer that has not been finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransferLine {
    /// Bucket the credits are drawn from.
    pub key: BalanceKey,
    /// Credits committed by the line.
    pub credit_value: Decimal,
}

/// Balance adjustment for a bucket from pending outgoing transfers.
///
/// `credit_value` is zero or negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBalance {
    /// Affected bucket.
    pub key: BalanceKey,
    /// Negated sum of pending line values.
    pub credit_value: Decimal,
}

/// Sums pending lines per bucket and negates the result.
#[must_use]
pub fn aggregate_pending_transfers<'a, I>(lines: I) -> Vec<PendingBalance>
where
    I: IntoIterator<Item = &'a PendingTransferLine>,
{
    let mut sums: BTreeMap<BalanceKey, Decimal> = BTreeMap::new();
    for line in lines {
        *sums.entry(line.key).or_default() += line.credit_value;
    }

    sums.into_iter()
        .map(|(key, sum)| PendingBalance {
            key,
            credit_value: -sum,
        })
        .collect()
}

/// Adds pending adjustments onto issued balances by exact bucket.
///
/// Issued buckets without a pending counterpart pass through unchanged.
/// Pending buckets with no issued balance are dropped.
#[must_use]
pub fn apply_pending_balances(
    issued: Vec<CreditBalance>,
    pending: &[PendingBalance],
) -> Vec<CreditBalance> {
    let adjustments: HashMap<BalanceKey, Decimal> =
        pending.iter().map(|p| (p.key, p.credit_value)).collect();

    issued
        .into_iter()
        .map(|mut balance| {
            if let Some(adjustment) = adjustments.get(&balance.key()) {
                balance.total_value += *adjustment;
            }
            balance
        })
        .collect()
}
