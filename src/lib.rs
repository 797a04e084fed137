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

//! # Expense Ledger
//!
//! This library provides a personal finance ledger engine: free-text
//! transaction records are validated, stored in order, persisted to CSV,
//! and summarized per category for a day, week or month.
//!
//! ## Core Components
//!
//! - [`Engine`]: Entry point for submitting entries and requesting summaries
//! - [`Entry`]: Validated transaction record (date, category, amount, description, type)
//! - [`LedgerStore`]: Ordered entry storage that persists after every mutation
//! - [`Persistence`]: Durable storage backends ([`CsvFile`], [`MemoryBackend`])
//! - [`Report`]: Period-filtered category totals
//! - [`CategoryBreakdown`]: Whole-ledger category totals and chart shares
//! - [`EntryError`] / [`StoreError`] / [`SummaryError`]: Validation, storage and aggregation failures
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use expense_ledger_rs::{Engine, MemoryBackend, Period, ReportResult, Submission};
//! use rust_decimal_macros::dec;
//!
//! let engine = Engine::open(MemoryBackend::new()).unwrap();
//!
//! // Submit entries
//! let submission = engine.submit("2024-11-01, Food, 500, Dinner, Expense").unwrap();
//! assert!(submission.is_accepted());
//! let submission = engine.submit("2024-11-01, Food, abc, Dinner, Expense").unwrap();
//! assert!(matches!(submission, Submission::Rejected(_)));
//!
//! // Daily report
//! let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
//! let ReportResult::Report(report) = engine.report(Period::Day, today).unwrap() else {
//!     panic!("expected data");
//! };
//! assert_eq!(report.get("Food"), Some(dec!(500)));
//! ```

mod base;
mod engine;
pub mod entry;
pub mod error;
pub mod persistence;
mod report;
mod store;
mod visualize;

pub use base::{DATE_FORMAT, Period, UnknownPeriod};
pub use engine::{Engine, ReportResult, Submission, VisualizationResult};
pub use entry::Entry;
pub use error::{EntryError, StoreError, SummaryError};
pub use persistence::{CsvFile, MemoryBackend, Persistence};
pub use report::Report;
pub use store::{LedgerStore, Snapshot};
pub use visualize::{CategoryBreakdown, Slice};
