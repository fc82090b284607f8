//! Property-based tests for balance aggregation.
//!
//! - Property 1: Net Conservation
//! - Property 2: Aggregation Idempotence
//! - Property 3: Pending Merge Preserves Issued Buckets

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::{LedgerMovement, aggregate_credit_balances, net_total};
use super::pending::{PendingTransferLine, aggregate_pending_transfers, apply_pending_balances};
use super::types::BalanceKey;
use creditledger_shared::types::OrganizationId;

/// Strategy to generate positive credit amounts (0.01 to 1,000.00).
fn credit_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a bucket from a small key space so buckets repeat.
fn bucket() -> impl Strategy<Value = BalanceKey> {
    (1i32..4, 1i32..3, 1i32..3).prop_map(|(y, c, w)| BalanceKey::new(y, c, w))
}

/// Which side of a movement the organization under test sits on.
#[derive(Debug, Clone, Copy)]
enum Side {
    Credit,
    Debit,
    Both,
    Neither,
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Credit),
        Just(Side::Debit),
        Just(Side::Both),
        Just(Side::Neither),
    ]
}

fn movements(
    org: OrganizationId,
    other: OrganizationId,
) -> impl Strategy<Value = Vec<LedgerMovement>> {
    prop::collection::vec((side(), bucket(), credit_amount()), 0..40).prop_map(move |rows| {
        rows.into_iter()
            .map(|(side, key, total_value)| {
                let (credit_to, debit_from) = match side {
                    Side::Credit => (Some(org), None),
                    Side::Debit => (None, Some(org)),
                    Side::Both => (Some(org), Some(org)),
                    Side::Neither => (Some(other), Some(other)),
                };
                LedgerMovement {
                    credit_to,
                    debit_from,
                    key,
                    total_value,
                }
            })
            .collect()
    })
}

fn fixed_orgs() -> (OrganizationId, OrganizationId) {
    (
        OrganizationId::from_uuid(uuid::Uuid::from_u128(1)),
        OrganizationId::from_uuid(uuid::Uuid::from_u128(2)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 1: Net Conservation**
    ///
    /// *For any* ledger, the sum of bucket nets equals everything credited
    /// to the organization minus everything debited from it.
    #[test]
    fn prop_net_conservation(rows in movements(fixed_orgs().0, fixed_orgs().1)) {
        let (org, _) = fixed_orgs();
        let balances = aggregate_credit_balances(org, &rows);

        let credited: Decimal = rows
            .iter()
            .filter(|m| m.credit_to == Some(org))
            .map(|m| m.total_value)
            .sum();
        let debited: Decimal = rows
            .iter()
            .filter(|m| m.debit_from == Some(org))
            .map(|m| m.total_value)
            .sum();

        prop_assert_eq!(net_total(&balances), credited - debited);
        for b in &balances {
            prop_assert_eq!(b.total_value, b.credit - b.debit);
        }
    }

    /// **Property 2: Aggregation Idempotence**
    ///
    /// *For any* ledger, aggregating twice yields identical output in
    /// strictly ascending bucket order.
    #[test]
    fn prop_aggregation_idempotent(rows in movements(fixed_orgs().0, fixed_orgs().1)) {
        let (org, _) = fixed_orgs();
        let first = aggregate_credit_balances(org, &rows);
        let second = aggregate_credit_balances(org, &rows);

        prop_assert_eq!(&first, &second);
        for pair in first.windows(2) {
            prop_assert!(pair[0].key() < pair[1].key());
        }
    }

    /// **Property 3: Pending Merge Preserves Issued Buckets**
    ///
    /// *For any* issued balances and pending lines, the merge keeps exactly
    /// the issued buckets and never raises a net.
    #[test]
    fn prop_pending_merge_keeps_issued_buckets(
        rows in movements(fixed_orgs().0, fixed_orgs().1),
        pending_lines in prop::collection::vec((bucket(), credit_amount()), 0..10),
    ) {
        let (org, _) = fixed_orgs();
        let issued = aggregate_credit_balances(org, &rows);
        let lines: Vec<_> = pending_lines
            .into_iter()
            .map(|(key, credit_value)| PendingTransferLine { key, credit_value })
            .collect();
        let pending = aggregate_pending_transfers(&lines);

        let merged = apply_pending_balances(issued.clone(), &pending);

        prop_assert_eq!(merged.len(), issued.len());
        for (before, after) in issued.iter().zip(&merged) {
            prop_assert_eq!(before.key(), after.key());
            prop_assert!(after.total_value <= before.total_value);
            prop_assert_eq!(before.credit, after.credit);
        }
    }
}
