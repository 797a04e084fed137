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

//! Period reports.
//!
//! A [`Report`] sums entry amounts per category for the entries whose date
//! falls inside a [`Period`] window. Categories are kept in sorted order so
//! output is reproducible.

use crate::base::Period;
use crate::entry::Entry;
use crate::error::SummaryError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// Category totals for one period window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    period: Period,
    reference: NaiveDate,
    totals: BTreeMap<String, Decimal>,
}

impl Report {
    /// Builds the report for `period` anchored at `reference`.
    ///
    /// Returns `Ok(None)` when no entry falls inside the window, so callers can
    /// tell "no data" apart from a summary.
    ///
    /// # Errors
    ///
    /// [`SummaryError::Overflow`] if a category total does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use expense_ledger_rs::{Entry, Period, Report};
    /// use rust_decimal_macros::dec;
    ///
    /// let ledger = vec![
    ///     Entry::parse("2024-11-01, Food, 500, Dinner, Expense").unwrap(),
    ///     Entry::parse("2024-11-01, Food, 100, Lunch, Expense").unwrap(),
    ///     Entry::parse("2024-11-02, Transport, 50, Bus, Expense").unwrap(),
    /// ];
    /// let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    ///
    /// let report = Report::generate(&ledger, Period::Day, today).unwrap().unwrap();
    /// assert_eq!(report.get("Food"), Some(dec!(600)));
    /// assert_eq!(report.len(), 1);
    /// ```
    pub fn generate(
        entries: &[Entry],
        period: Period,
        reference: NaiveDate,
    ) -> Result<Option<Self>, SummaryError> {
        let totals = sum_by_category(
            entries
                .iter()
                .filter(|entry| period.contains(reference, entry.date())),
        )?;

        Ok(totals.map(|totals| Self {
            period,
            reference,
            totals,
        }))
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Date the window is anchored at.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// First date included in the window.
    pub fn since(&self) -> NaiveDate {
        self.period.window_start(self.reference)
    }

    /// Total for `category`, if any entry of that category is in the window.
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    /// Iterates `(category, total)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(category, total)| (category.as_str(), *total))
    }

    pub fn totals(&self) -> &BTreeMap<String, Decimal> {
        &self.totals
    }

    pub fn into_totals(self) -> BTreeMap<String, Decimal> {
        self.totals
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns `true` if the report has no categories.
    ///
    /// [`Report::generate`] only builds reports for non-empty windows, so a
    /// generated report always has at least one category.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum over all categories, or `None` if it does not fit in a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        self.totals
            .values()
            .try_fold(Decimal::ZERO, |sum, total| sum.checked_add(*total))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.period.label())?;
        for (category, total) in self.iter() {
            writeln!(f, "{category}: {total}")?;
        }
        Ok(())
    }
}

/// Groups entries by category and sums their amounts.
///
/// Returns `Ok(None)` if `entries` is empty.
pub(crate) fn sum_by_category<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Result<Option<BTreeMap<String, Decimal>>, SummaryError> {
    let mut totals = BTreeMap::new();
    let mut seen = false;
    for entry in entries {
        seen = true;
        let total = totals
            .entry(entry.category().to_string())
            .or_insert(Decimal::ZERO);
        *total = total
            .checked_add(entry.amount())
            .ok_or_else(|| SummaryError::Overflow {
                category: entry.category().to_string(),
            })?;
    }
    Ok(seen.then_some(totals))
}
