//! Transfer validation against the initiator's balances.
//!
//! Validation never touches the aggregated records: it copies their nets
//! into a [`BalanceLedger`] and withdraws each content line from that copy.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::CreditBalance;
use super::error::CreditError;
use super::types::{BalanceKey, YearClassKey};

/// One content line of a credit transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    /// Bucket the credits are drawn from.
    pub key: BalanceKey,
    /// Credits moved by this line.
    pub credit_value: Decimal,
}

/// Mutable working copy of bucket nets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    balances: BTreeMap<BalanceKey, Decimal>,
}

impl BalanceLedger {
    /// Copies the net of each aggregated bucket.
    #[must_use]
    pub fn from_balances(balances: &[CreditBalance]) -> Self {
        Self {
            balances: balances.iter().map(|b| (b.key(), b.total_value)).collect(),
        }
    }

    /// Remaining value of a bucket, `None` if the bucket never existed.
    #[must_use]
    pub fn available(&self, key: &BalanceKey) -> Option<Decimal> {
        self.balances.get(key).copied()
    }

    /// Withdraws `amount` from a bucket.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InsufficientCredits` if the bucket is absent or
    /// the withdrawal would leave it negative. The ledger is unchanged on
    /// error.
    pub fn withdraw(&mut self, key: &BalanceKey, amount: Decimal) -> Result<Decimal, CreditError> {
        let balance = self
            .balances
            .get_mut(key)
            .ok_or(CreditError::InsufficientCredits)?;
        let remaining = *balance - amount;
        if remaining < Decimal::ZERO {
            return Err(CreditError::InsufficientCredits);
        }
        *balance = remaining;
        Ok(remaining)
    }
}

/// Accumulated transfer content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTotals {
    /// Summed value per (model year, credit class). One ledger entry each.
    pub by_year_and_class: BTreeMap<YearClassKey, Decimal>,
    /// Summed value per credit class.
    pub by_class: BTreeMap<i32, Decimal>,
}

impl TransferTotals {
    fn add(&mut self, line: &TransferLine) {
        let key = YearClassKey {
            model_year_id: line.key.model_year_id,
            credit_class_id: line.key.credit_class_id,
        };
        *self.by_year_and_class.entry(key).or_default() += line.credit_value;
        *self.by_class.entry(line.key.credit_class_id).or_default() += line.credit_value;
    }

    /// True when the transfer had no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_year_and_class.is_empty()
    }
}

/// Checks every line against the initiator's balances and accumulates the
/// transfer totals.
///
/// Lines are applied in order against a running copy, so two lines on the
/// same bucket must fit together.
///
/// # Errors
///
/// Returns `CreditError::InsufficientCredits` at the first line whose bucket
/// is missing or would go negative.
pub fn plan_transfer(
    balances: &[CreditBalance],
    lines: &[TransferLine],
) -> Result<TransferTotals, CreditError> {
    let mut ledger = BalanceLedger::from_balances(balances);
    let mut totals = TransferTotals::default();

    for line in lines {
        ledger.withdraw(&line.key, line.credit_value)?;
        totals.add(line);
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const A: i32 = 1;
    const B: i32 = 2;
    const LDV: i32 = 1;

    fn balance(model_year_id: i32, credit_class_id: i32, total: Decimal) -> CreditBalance {
        CreditBalance {
            credit: total,
            total_value: total,
            ..CreditBalance::empty(BalanceKey::new(model_year_id, credit_class_id, LDV))
        }
    }

    fn line(model_year_id: i32, credit_class_id: i32, value: Decimal) -> TransferLine {
        TransferLine {
            key: BalanceKey::new(model_year_id, credit_class_id, LDV),
            credit_value: value,
        }
    }

    #[test]
    fn test_lines_within_balance_succeed() {
        let balances = vec![balance(5, A, dec!(100)), balance(5, B, dec!(20))];
        let lines = vec![line(5, A, dec!(60)), line(5, A, dec!(40)), line(5, B, dec!(5))];

        let totals = plan_transfer(&balances, &lines).unwrap();

        let a_key = YearClassKey {
            model_year_id: 5,
            credit_class_id: A,
        };
        assert_eq!(totals.by_year_and_class[&a_key], dec!(100));
        assert_eq!(totals.by_class[&B], dec!(5));
        assert_eq!(totals.by_year_and_class.len(), 2);
    }

    #[test]
    fn test_cumulative_lines_over_balance_fail() {
        let balances = vec![balance(5, A, dec!(100))];
        let lines = vec![line(5, A, dec!(60)), line(5, A, dec!(50))];

        let err = plan_transfer(&balances, &lines).unwrap_err();

        assert_eq!(err, CreditError::InsufficientCredits);
        assert_eq!(
            err.to_string(),
            "Supplier has insufficient credits to fulfil this transfer."
        );
    }

    #[test]
    fn test_missing_bucket_is_insufficient() {
        let balances = vec![balance(5, A, dec!(100))];
        let lines = vec![line(6, A, dec!(1))];

        assert_eq!(
            plan_transfer(&balances, &lines),
            Err(CreditError::InsufficientCredits)
        );
    }

    #[test]
    fn test_exact_balance_drains_to_zero() {
        let balances = vec![balance(5, A, dec!(100))];
        let mut ledger = BalanceLedger::from_balances(&balances);
        let key = BalanceKey::new(5, A, LDV);

        assert_eq!(ledger.withdraw(&key, dec!(100)).unwrap(), Decimal::ZERO);
        assert_eq!(ledger.available(&key), Some(Decimal::ZERO));
    }

    #[test]
    fn test_failed_withdraw_leaves_ledger_unchanged() {
        let balances = vec![balance(5, A, dec!(10))];
        let mut ledger = BalanceLedger::from_balances(&balances);
        let key = BalanceKey::new(5, A, LDV);

        assert!(ledger.withdraw(&key, dec!(10.01)).is_err());
        assert_eq!(ledger.available(&key), Some(dec!(10)));
    }

    #[test]
    fn test_no_lines_succeed_trivially() {
        let totals = plan_transfer(&[], &[]).unwrap();
        assert!(totals.is_empty());
        assert!(totals.by_class.is_empty());
    }

    #[test]
    fn test_totals_iterate_by_year_then_class() {
        let balances = vec![
            balance(6, A, dec!(10)),
            balance(5, B, dec!(10)),
            balance(5, A, dec!(10)),
        ];
        let lines = vec![line(6, A, dec!(1)), line(5, B, dec!(2)), line(5, A, dec!(3))];

        let totals = plan_transfer(&balances, &lines).unwrap();
        let order: Vec<_> = totals
            .by_year_and_class
            .keys()
            .map(|k| (k.model_year_id, k.credit_class_id))
            .collect();

        assert_eq!(order, vec![(5, A), (5, B), (6, A)]);
    }
}
