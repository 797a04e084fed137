// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Property-based tests for the ledger engine.
//!
//! These tests verify invariants that should hold for any sequence of
//! valid entries.

use chrono::NaiveDate;
use expense_ledger_rs::persistence::{read_entries, write_entries};
use expense_ledger_rs::{
    CategoryBreakdown, Engine, Entry, EntryError, MemoryBackend, Period, Report, Submission,
    SummaryError,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Cursor;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a date between 2000-01-01 and roughly 2040.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..15_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    })
}

/// Generate a signed amount: mostly everyday values with up to 4 decimal
/// places, sometimes values at the edge of the `Decimal` range.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        8 => (-10_000_000i64..=10_000_000i64).prop_map(|units| Decimal::new(units, 4)),
        1 => prop_oneof![Just(Decimal::MAX), Just(Decimal::MIN)],
        1 => (0u32..1_000).prop_map(|n| Decimal::MAX - Decimal::from(n)),
    ]
}

/// Free text that may contain commas, quotes and non-ASCII letters.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Zа-яА-Я0-9 ,\"'.-]{0,16}"
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (arb_date(), arb_text(), arb_amount(), arb_text(), arb_text()).prop_map(
        |(date, category, amount, description, kind)| {
            Entry::new(date, category, amount, description, kind)
        },
    )
}

/// Entries drawn from a few categories, so totals collide often.
fn arb_ledger_entry() -> impl Strategy<Value = Entry> {
    (
        arb_date(),
        prop::sample::select(vec!["Food", "Rent", ""]),
        arb_amount(),
    )
        .prop_map(|(date, category, amount)| Entry::new(date, category, amount, "", "Expense"))
}

/// Checked per-category sums, failing on the first category that overflows.
fn checked_totals<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Result<BTreeMap<String, Decimal>, SummaryError> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        let total: &mut Decimal = totals.entry(entry.category().to_string()).or_default();
        *total = total
            .checked_add(entry.amount())
            .ok_or_else(|| SummaryError::Overflow {
                category: entry.category().to_string(),
            })?;
    }
    Ok(totals)
}

// =============================================================================
// Persistence Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Writing a ledger and reading it back yields the same entries in order.
    #[test]
    fn csv_round_trip(entries in prop::collection::vec(arb_entry(), 0..20)) {
        let mut buffer = Vec::new();
        write_entries(&entries, &mut buffer).unwrap();

        let parsed = read_entries(Cursor::new(buffer)).unwrap();
        prop_assert_eq!(parsed, entries);
    }
}

// =============================================================================
// Validation Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any text without exactly five ", " fields is rejected as malformed.
    #[test]
    fn wrong_field_count_always_rejected(
        fields in prop::collection::vec("[a-z0-9.-]{0,8}", 0..10)
            .prop_filter("five fields parse as an entry", |f| f.len() != 5),
    ) {
        let raw = fields.join(", ");
        let engine = Engine::open(MemoryBackend::new()).unwrap();

        let submission = engine.submit(&raw).unwrap();
        let is_malformed = matches!(
            submission,
            Submission::Rejected(EntryError::Malformed { .. })
        );
        prop_assert!(is_malformed);
        prop_assert!(engine.is_empty());
    }

    /// A well-formed line always parses back into the entry it came from.
    #[test]
    fn formatted_entry_parses(
        date in arb_date(),
        amount in arb_amount(),
        category in "[A-Za-zА-я]{1,10}",
        description in "[A-Za-z ]{0,10}",
    ) {
        let raw = format!("{date}, {category}, {amount}, {description}, Expense");
        let entry = Entry::parse(&raw).unwrap();

        prop_assert_eq!(entry.date(), date);
        prop_assert_eq!(entry.amount(), amount);
        prop_assert_eq!(entry.category(), category.as_str());
        prop_assert_eq!(entry.description(), description.as_str());
    }
}

// =============================================================================
// Aggregation Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Breakdown totals are the exact per-category sums, or a typed overflow.
    #[test]
    fn breakdown_matches_checked_sums(entries in prop::collection::vec(arb_ledger_entry(), 1..30)) {
        match (CategoryBreakdown::build(&entries), checked_totals(&entries)) {
            (Ok(Some(breakdown)), Ok(expected)) => {
                prop_assert_eq!(breakdown.totals(), &expected);
            }
            (Err(actual), Err(expected)) => {
                prop_assert_eq!(actual, expected);
            }
            (actual, expected) => {
                prop_assert!(false, "got {:?}, expected {:?}", actual, expected);
            }
        }
    }

    /// Shares are within 0..=1 and add up to one.
    #[test]
    fn breakdown_shares_sum_to_one(entries in prop::collection::vec(arb_ledger_entry(), 1..30)) {
        let Ok(Some(breakdown)) = CategoryBreakdown::build(&entries) else {
            return Ok(());
        };
        let shares: Vec<Decimal> = breakdown.slices().filter_map(|slice| slice.share).collect();
        if !shares.is_empty() {
            let sum: Decimal = shares.iter().sum();
            prop_assert!(shares.iter().all(|s| *s >= Decimal::ZERO && *s <= Decimal::ONE));
            prop_assert!((sum - Decimal::ONE).abs() < Decimal::new(1, 20));
        }
    }

    /// A report sums exactly the entries inside its window.
    #[test]
    fn report_matches_filtered_sum(
        entries in prop::collection::vec(arb_ledger_entry(), 0..30),
        today in arb_date(),
        period in prop::sample::select(Period::ALL.to_vec()),
    ) {
        let inside: Vec<&Entry> = entries
            .iter()
            .filter(|e| period.contains(today, e.date()))
            .collect();

        match (Report::generate(&entries, period, today), checked_totals(inside.iter().copied())) {
            (Ok(None), Ok(expected)) => {
                prop_assert!(expected.is_empty());
            }
            (Ok(Some(report)), Ok(expected)) => {
                prop_assert_eq!(report.totals(), &expected);
            }
            (Err(actual), Err(expected)) => {
                prop_assert_eq!(actual, expected);
            }
            (actual, expected) => {
                prop_assert!(false, "got {:?}, expected {:?}", actual, expected);
            }
        }
    }

    /// Wider windows never lose entries that narrower windows include.
    #[test]
    fn windows_are_nested(date in arb_date(), today in arb_date()) {
        if Period::Day.contains(today, date) {
            prop_assert!(Period::Week.contains(today, date));
        }
        if Period::Week.contains(today, date) {
            prop_assert!(Period::Month.contains(today, date));
        }
    }
}
