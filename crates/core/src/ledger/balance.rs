//! Per-bucket balance aggregation.
//!
//! A balance is derived, never stored: it is the fold of every ledger entry
//! touching an organization, grouped by (model year, credit class, weight
//! class).

use std::collections::BTreeMap;

use creditledger_shared::types::OrganizationId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::BalanceKey;

/// The part of a ledger entry that moves balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMovement {
    /// Receiving organization, if any.
    pub credit_to: Option<OrganizationId>,
    /// Paying organization, if any.
    pub debit_from: Option<OrganizationId>,
    /// Bucket the entry is tagged with.
    pub key: BalanceKey,
    /// `number_of_credits × credit_value`.
    pub total_value: Decimal,
}

/// Net credit position of one organization in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    /// Model year reference id.
    pub model_year_id: i32,
    /// Credit class reference id.
    pub credit_class_id: i32,
    /// Weight class reference id.
    pub weight_class_id: i32,
    /// Sum of entries crediting the organization.
    pub credit: Decimal,
    /// Sum of entries debiting the organization.
    pub debit: Decimal,
    /// `credit - debit`.
    pub total_value: Decimal,
}

impl CreditBalance {
    /// Empty balance for a bucket.
    #[must_use]
    pub const fn empty(key: BalanceKey) -> Self {
        Self {
            model_year_id: key.model_year_id,
            credit_class_id: key.credit_class_id,
            weight_class_id: key.weight_class_id,
            credit: Decimal::ZERO,
            debit: Decimal::ZERO,
            total_value: Decimal::ZERO,
        }
    }

    /// The bucket this balance belongs to.
    #[must_use]
    pub const fn key(&self) -> BalanceKey {
        BalanceKey::new(self.model_year_id, self.credit_class_id, self.weight_class_id)
    }

    fn add_credit(&mut self, amount: Decimal) {
        self.credit += amount;
        self.total_value = self.credit - self.debit;
    }

    fn add_debit(&mut self, amount: Decimal) {
        self.debit += amount;
        self.total_value = self.credit - self.debit;
    }
}

/// Groups every movement touching `organization` into bucket balances,
/// ordered by model year, credit class and weight class.
///
/// Movements that touch neither side of the organization are skipped. An
/// entry with the organization on both sides counts as credit and debit.
#[must_use]
pub fn aggregate_credit_balances<'a, I>(
    organization: OrganizationId,
    movements: I,
) -> Vec<CreditBalance>
where
    I: IntoIterator<Item = &'a LedgerMovement>,
{
    let mut buckets: BTreeMap<BalanceKey, CreditBalance> = BTreeMap::new();

    for movement in movements {
        let credited = movement.credit_to == Some(organization);
        let debited = movement.debit_from == Some(organization);
        if !credited && !debited {
            continue;
        }

        let balance = buckets
            .entry(movement.key)
            .or_insert_with(|| CreditBalance::empty(movement.key));
        if credited {
            balance.add_credit(movement.total_value);
        }
        if debited {
            balance.add_debit(movement.total_value);
        }
    }

    buckets.into_values().collect()
}

/// Sum of nets across buckets.
#[must_use]
pub fn net_total(balances: &[CreditBalance]) -> Decimal {
    balances.iter().map(|b| b.total_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn issue(to: OrganizationId, key: BalanceKey, value: Decimal) -> LedgerMovement {
        LedgerMovement {
            credit_to: Some(to),
            debit_from: None,
            key,
            total_value: value,
        }
    }

    fn reduce(from: OrganizationId, key: BalanceKey, value: Decimal) -> LedgerMovement {
        LedgerMovement {
            credit_to: None,
            debit_from: Some(from),
            key,
            total_value: value,
        }
    }

    #[test]
    fn test_empty_ledger_has_no_buckets() {
        let movements: Vec<LedgerMovement> = Vec::new();
        assert!(aggregate_credit_balances(OrganizationId::new(), &movements).is_empty());
    }

    #[test]
    fn test_credit_and_debit_in_same_bucket() {
        let org = OrganizationId::new();
        let key = BalanceKey::new(5, 1, 1);
        let movements = vec![
            issue(org, key, dec!(100)),
            issue(org, key, dec!(20.5)),
            reduce(org, key, dec!(30)),
        ];

        let balances = aggregate_credit_balances(org, &movements);

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].credit, dec!(120.5));
        assert_eq!(balances[0].debit, dec!(30));
        assert_eq!(balances[0].total_value, dec!(90.5));
        assert_eq!(balances[0].key(), key);
    }

    #[test]
    fn test_debit_only_bucket_is_negative() {
        let org = OrganizationId::new();
        let key = BalanceKey::new(2, 2, 1);
        let balances = aggregate_credit_balances(org, &[reduce(org, key, dec!(7))]);

        assert_eq!(balances[0].credit, Decimal::ZERO);
        assert_eq!(balances[0].total_value, dec!(-7));
    }

    #[test]
    fn test_other_organizations_are_ignored() {
        let org = OrganizationId::new();
        let other = OrganizationId::new();
        let key = BalanceKey::new(1, 1, 1);
        let movements = vec![issue(other, key, dec!(50)), issue(org, key, dec!(5))];

        let balances = aggregate_credit_balances(org, &movements);

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].total_value, dec!(5));
    }

    #[test]
    fn test_transfer_row_moves_between_parties() {
        let seller = OrganizationId::new();
        let buyer = OrganizationId::new();
        let key = BalanceKey::new(3, 1, 1);
        let movements = vec![
            issue(seller, key, dec!(100)),
            LedgerMovement {
                credit_to: Some(buyer),
                debit_from: Some(seller),
                key,
                total_value: dec!(40),
            },
        ];

        let seller_balances = aggregate_credit_balances(seller, &movements);
        let buyer_balances = aggregate_credit_balances(buyer, &movements);

        assert_eq!(seller_balances[0].total_value, dec!(60));
        assert_eq!(buyer_balances[0].total_value, dec!(40));
        assert_eq!(buyer_balances[0].debit, Decimal::ZERO);
    }

    #[test]
    fn test_buckets_are_ordered_by_key() {
        let org = OrganizationId::new();
        let movements = vec![
            issue(org, BalanceKey::new(6, 1, 1), dec!(1)),
            issue(org, BalanceKey::new(4, 2, 1), dec!(1)),
            issue(org, BalanceKey::new(4, 1, 1), dec!(1)),
        ];

        let keys: Vec<_> = aggregate_credit_balances(org, &movements)
            .iter()
            .map(CreditBalance::key)
            .collect();

        assert_eq!(
            keys,
            vec![
                BalanceKey::new(4, 1, 1),
                BalanceKey::new(4, 2, 1),
                BalanceKey::new(6, 1, 1),
            ]
        );
    }
}
