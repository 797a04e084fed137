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

//! Ledger engine.
//!
//! The [`Engine`] is the boundary consumed by a transport layer (chat bot,
//! CLI, HTTP handler). It accepts raw entry text and returns structured
//! results; it never renders output itself.
//!
//! # Operations
//!
//! - **Submit**: Validate raw text and append the entry, persisting the ledger.
//! - **Report**: Category totals for a day, week or month window.
//! - **Visualize**: Category totals and shares over the entire ledger.
//! - **Reset**: Clear the ledger and persist the empty table.
//!
//! # Thread Safety
//!
//! All mutations go through [`LedgerStore`], which serializes each mutation
//! together with its save. Reads work on snapshots and never block writers
//! for longer than an `Arc` clone.

use crate::base::Period;
use crate::entry::Entry;
use crate::error::{EntryError, StoreError, SummaryError};
use crate::persistence::{CsvFile, Persistence};
use crate::report::Report;
use crate::store::{LedgerStore, Snapshot};
use crate::visualize::CategoryBreakdown;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Outcome of [`Engine::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Entry was validated and appended.
    Accepted(Entry),
    /// Entry was rejected; the ledger is unchanged.
    Rejected(EntryError),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Outcome of [`Engine::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportResult {
    Report(Report),
    /// No entry falls inside the requested window.
    NoData,
}

/// Outcome of [`Engine::visualize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualizationResult {
    Summary(CategoryBreakdown),
    /// The ledger is empty.
    NoData,
}

/// Personal finance ledger engine.
///
/// # Invariants
///
/// - Only entries that passed validation are ever stored.
/// - Entry order is insertion order.
/// - The durable store is written after every accepted submission and every
///   reset; a failed write is reported, never swallowed.
pub struct Engine {
    store: LedgerStore,
}

impl Engine {
    /// Opens an engine on top of `backend`, restoring any stored entries.
    ///
    /// # Errors
    ///
    /// [`StoreError::Load`] if a stored row does not validate. Startup is
    /// refused rather than dropping the row.
    pub fn open(backend: impl Persistence + 'static) -> Result<Self, StoreError> {
        Ok(Self {
            store: LedgerStore::open(backend)?,
        })
    }

    /// Opens an engine backed by the CSV file at `path`.
    pub fn open_csv(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(CsvFile::new(path))
    }

    /// Validates `raw` and appends the resulting entry.
    ///
    /// Validation failures come back as [`Submission::Rejected`]; they are a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the entry was appended in memory but could not
    /// be saved.
    pub fn submit(&self, raw: &str) -> Result<Submission, StoreError> {
        let entry = match Entry::parse(raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "entry rejected");
                return Ok(Submission::Rejected(e));
            }
        };

        self.store.append(entry.clone())?;
        Ok(Submission::Accepted(entry))
    }

    /// Builds the report for `period` anchored at `today`.
    ///
    /// # Errors
    ///
    /// [`SummaryError::Overflow`] if a category total in the window does not
    /// fit in a `Decimal`. The ledger is left as is.
    pub fn report(&self, period: Period, today: NaiveDate) -> Result<ReportResult, SummaryError> {
        let report = Report::generate(&self.store.snapshot(), period, today)
            .inspect_err(|e| tracing::warn!(error = %e, %period, "report failed"))?;
        Ok(match report {
            Some(report) => ReportResult::Report(report),
            None => ReportResult::NoData,
        })
    }

    /// Builds the category breakdown over the whole ledger.
    ///
    /// # Errors
    ///
    /// [`SummaryError::Overflow`] if a category total does not fit in a `Decimal`.
    pub fn visualize(&self) -> Result<VisualizationResult, SummaryError> {
        let breakdown = CategoryBreakdown::build(&self.store.snapshot())
            .inspect_err(|e| tracing::warn!(error = %e, "visualization failed"))?;
        Ok(match breakdown {
            Some(breakdown) => VisualizationResult::Summary(breakdown),
            None => VisualizationResult::NoData,
        })
    }

    /// Clears every entry. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the empty ledger could not be saved.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.reset()
    }

    /// Returns the current entries in insertion order.
    pub fn entries(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
