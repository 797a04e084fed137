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

//! Category breakdown for charting.
//!
//! Unlike a [`Report`](crate::Report), the breakdown covers the whole ledger
//! with no date filter. It only produces numbers; drawing the chart is left
//! to the caller.

use crate::entry::Entry;
use crate::error::SummaryError;
use crate::report::sum_by_category;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// One category of a [`CategoryBreakdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<'a> {
    pub category: &'a str,
    pub total: Decimal,
    /// `|total|` divided by the sum of all `|total|`, in `0..=1`.
    ///
    /// `None` when every category nets to zero, or when the sum of all
    /// `|total|` does not fit in a `Decimal`.
    pub share: Option<Decimal>,
}

/// Per-category totals over the entire ledger.
///
/// Categories whose total is zero or negative are kept; shares are taken
/// over absolute totals so they always add up to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    totals: BTreeMap<String, Decimal>,
    /// Sum of absolute category totals; `None` on overflow.
    magnitude: Option<Decimal>,
}

impl CategoryBreakdown {
    /// Builds the breakdown, or `Ok(None)` for an empty ledger.
    ///
    /// # Errors
    ///
    /// [`SummaryError::Overflow`] if a category total does not fit in a `Decimal`.
    pub fn build(entries: &[Entry]) -> Result<Option<Self>, SummaryError> {
        let Some(totals) = sum_by_category(entries)? else {
            return Ok(None);
        };
        let magnitude = totals
            .values()
            .try_fold(Decimal::ZERO, |sum, total| sum.checked_add(total.abs()));
        Ok(Some(Self { totals, magnitude }))
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    /// Share of `category` in the chart, see [`Slice::share`].
    pub fn share(&self, category: &str) -> Option<Decimal> {
        self.get(category).and_then(|total| self.share_of(total))
    }

    /// Iterates slices in category order.
    pub fn slices(&self) -> impl Iterator<Item = Slice<'_>> {
        self.totals.iter().map(|(category, total)| Slice {
            category,
            total: *total,
            share: self.share_of(*total),
        })
    }

    pub fn totals(&self) -> &BTreeMap<String, Decimal> {
        &self.totals
    }

    pub fn into_totals(self) -> BTreeMap<String, Decimal> {
        self.totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    fn share_of(&self, total: Decimal) -> Option<Decimal> {
        let magnitude = self.magnitude.filter(|m| !m.is_zero())?;
        total.abs().checked_div(magnitude)
    }
}

impl fmt::Display for CategoryBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expenses by category:")?;
        for slice in self.slices() {
            match slice.share {
                Some(share) => {
                    let percent = (share * Decimal::ONE_HUNDRED).round_dp(1);
                    writeln!(f, "{}: {} ({percent}%)", slice.category, slice.total)?
                }
                None => writeln!(f, "{}: {}", slice.category, slice.total)?,
            }
        }
        Ok(())
    }
}
