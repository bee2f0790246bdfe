//! Property-based tests for cash flow deduplication and merging.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::cash_flow_type::CashFlowType;
use super::error::CashFlowError;
use super::security_event_cash_flow::SecurityEventCashFlow;
use crate::report::{DuplicatePolicy, collect_without_duplicates};
use broker_report_shared::types::CashFlowId;

/// Strategy for a portfolio from a small pool, so keys collide often.
fn portfolio_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("10200I".to_string()), Just("10200J".to_string())]
}

/// Strategy for a timestamp from a small pool.
fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3).prop_map(|day| {
        Utc.with_ymd_and_hms(2021, 1, 1, 16, 0, 0).unwrap() + chrono::Duration::days(day)
    })
}

fn event_type_strategy() -> impl Strategy<Value = CashFlowType> {
    prop_oneof![
        Just(CashFlowType::Dividend),
        Just(CashFlowType::Coupon),
        Just(CashFlowType::Tax),
    ]
}

/// Strategy for an amount from -1,000,000.00 to 1,000,000.00.
fn value_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn currency_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("RUB".to_string())),
        Just(Some("USD".to_string())),
    ]
}

fn cash_flow_strategy() -> impl Strategy<Value = SecurityEventCashFlow> {
    (
        portfolio_strategy(),
        timestamp_strategy(),
        1i32..4,
        event_type_strategy(),
        value_strategy(),
        proptest::option::of(1i32..20),
        currency_strategy(),
        proptest::option::of(1i32..1000),
    )
        .prop_map(
            |(portfolio, timestamp, security, event_type, value, count, currency, id)| {
                let builder = SecurityEventCashFlow::builder(
                    portfolio, timestamp, security, event_type, value,
                )
                .count(count)
                .id(id.map(CashFlowId));
                let builder = match currency {
                    Some(currency) => builder.currency(currency),
                    None => builder.no_currency(),
                };
                builder.build()
            },
        )
}

/// Two records with the same key; `(same currency, same count)` drawn independently.
fn duplicate_pair_strategy() -> impl Strategy<Value = (SecurityEventCashFlow, SecurityEventCashFlow)>
{
    (cash_flow_strategy(), value_strategy(), proptest::option::of(1i32..1000)).prop_map(
        |(first, value, id)| {
            let second = first.to_builder().value(value).id(id.map(CashFlowId)).build();
            (first, second)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Natural-key equality is reflexive and symmetric.
    #[test]
    fn prop_check_equality_reflexive_symmetric(
        a in cash_flow_strategy(),
        b in cash_flow_strategy(),
    ) {
        prop_assert!(SecurityEventCashFlow::check_equality(&a, &a));
        prop_assert_eq!(
            SecurityEventCashFlow::check_equality(&a, &b),
            SecurityEventCashFlow::check_equality(&b, &a)
        );
    }

    /// Natural-key equality is transitive.
    #[test]
    fn prop_check_equality_transitive(
        a in cash_flow_strategy(),
        b in cash_flow_strategy(),
        c in cash_flow_strategy(),
    ) {
        if SecurityEventCashFlow::check_equality(&a, &b)
            && SecurityEventCashFlow::check_equality(&b, &c)
        {
            prop_assert!(SecurityEventCashFlow::check_equality(&a, &c));
        }
    }

    /// Natural-key equality ignores value, count, currency and id.
    #[test]
    fn prop_check_equality_ignores_non_key_fields(
        a in cash_flow_strategy(),
        value in value_strategy(),
        count in proptest::option::of(1i32..20),
        id in proptest::option::of(1i32..1000),
    ) {
        let b = a
            .to_builder()
            .value(value)
            .count(count)
            .id(id.map(CashFlowId))
            .currency("XXX")
            .build();
        prop_assert!(SecurityEventCashFlow::check_equality(&a, &b));
    }

    /// Full equality implies natural-key equality.
    #[test]
    fn prop_full_equality_implies_key_equality(
        a in cash_flow_strategy(),
        b in cash_flow_strategy(),
    ) {
        if a == b {
            prop_assert!(SecurityEventCashFlow::check_equality(&a, &b));
        }
    }

    /// Merging sums values in either order; other fields follow the first operand.
    #[test]
    fn prop_merge_value_commutative((a, b) in duplicate_pair_strategy()) {
        let ab = SecurityEventCashFlow::merge_duplicates(&a, &b).unwrap();
        let ba = SecurityEventCashFlow::merge_duplicates(&b, &a).unwrap();
        prop_assert_eq!(ab.len(), 1);
        prop_assert_eq!(ba.len(), 1);
        prop_assert_eq!(ab[0].value(), a.value() + b.value());
        prop_assert_eq!(ab[0].value(), ba[0].value());
        prop_assert_eq!(&ab[0], &a.to_builder().value(ab[0].value()).build());
        prop_assert_eq!(&ba[0], &b.to_builder().value(ba[0].value()).build());
    }

    /// Merging fails exactly when currency or count differ, currency checked first.
    #[test]
    fn prop_merge_preconditions(a in cash_flow_strategy(), b in cash_flow_strategy()) {
        let result = SecurityEventCashFlow::merge_duplicates(&a, &b);
        if a.currency() != b.currency() {
            let currency_mismatch = matches!(result, Err(CashFlowError::CurrencyMismatch { .. }));
            prop_assert!(currency_mismatch, "expected CurrencyMismatch, got {:?}", result);
        } else if a.count() != b.count() {
            let count_mismatch = matches!(result, Err(CashFlowError::CountMismatch { .. }));
            prop_assert!(count_mismatch, "expected CountMismatch, got {:?}", result);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Folding duplicates keeps one row per natural key and preserves the total per key.
    #[test]
    fn prop_folding_preserves_totals(rows in proptest::collection::vec(cash_flow_strategy(), 0..30)) {
        // Same currency and count everywhere, so every duplicate merges.
        let rows: Vec<_> = rows
            .into_iter()
            .map(|row| row.to_builder().currency("RUB").count(1).build())
            .collect();

        let folded = collect_without_duplicates(
            rows.clone(),
            DuplicatePolicy::Strict,
            SecurityEventCashFlow::check_equality,
            SecurityEventCashFlow::merge_duplicates,
        )
        .unwrap();

        let mut expected: HashMap<_, Decimal> = HashMap::new();
        for row in &rows {
            *expected.entry(row.natural_key()).or_default() += row.value();
        }
        prop_assert_eq!(folded.len(), expected.len());
        for row in &folded {
            prop_assert_eq!(Some(&row.value()), expected.get(&row.natural_key()));
        }
    }

    /// Keeping conflicting duplicates never loses a row's value.
    #[test]
    fn prop_keep_both_preserves_grand_total(
        rows in proptest::collection::vec(cash_flow_strategy(), 0..30),
    ) {
        let total: Decimal = rows.iter().map(SecurityEventCashFlow::value).sum();
        let folded = collect_without_duplicates(
            rows,
            DuplicatePolicy::KeepBoth,
            SecurityEventCashFlow::check_equality,
            SecurityEventCashFlow::merge_duplicates,
        )
        .unwrap();
        let folded_total: Decimal = folded.iter().map(SecurityEventCashFlow::value).sum();
        prop_assert_eq!(folded_total, total);
    }

    /// JSON serialization round-trips every record.
    #[test]
    fn prop_json_round_trip(a in cash_flow_strategy()) {
        let json = serde_json::to_string(&a).unwrap();
        let parsed: SecurityEventCashFlow = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, a);
    }
}
