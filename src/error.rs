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

//! Error types for entry validation and ledger persistence.

use thiserror::Error;

/// Expected shape of a raw entry, shown to the user on malformed input.
pub const ENTRY_FORMAT_HINT: &str =
    "Date, Category, Amount, Description, Type (e.g. 2024-11-01, Food, 500, Dinner, Expense)";

/// Entry validation errors.
///
/// Every variant carries the rejected raw text so the caller can echo it
/// back alongside the specific cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Input did not split into exactly five `", "`-delimited fields
    #[error("expected 5 fields separated by \", \" but found {fields}; use format: {hint}", hint = ENTRY_FORMAT_HINT)]
    Malformed { raw: String, fields: usize },

    /// Date field is not a valid `YYYY-MM-DD` date
    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { raw: String, value: String },

    /// Amount field is not a finite number
    #[error("invalid amount '{value}' (expected a number)")]
    InvalidAmount { raw: String, value: String },
}

impl EntryError {
    /// Returns the raw text that was rejected.
    pub fn raw(&self) -> &str {
        match self {
            Self::Malformed { raw, .. } => raw,
            Self::InvalidDate { raw, .. } => raw,
            Self::InvalidAmount { raw, .. } => raw,
        }
    }
}

/// Aggregation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// A category total does not fit in a `Decimal`
    #[error("total for category '{category}' is out of range")]
    Overflow { category: String },
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the durable store failed
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The durable store is not well-formed CSV
    #[error("storage format error: {0}")]
    Csv(#[from] csv::Error),

    /// The durable store header does not match `Date,Category,Amount,Description,Type`
    #[error("unexpected ledger header: {found:?}")]
    Header { found: Vec<String> },

    /// A stored row failed entry validation
    #[error("invalid ledger row at line {line}: {source}")]
    Load {
        line: u64,
        #[source]
        source: EntryError,
    },
}

#[cfg(test)]
mod tests {
    use super::{EntryError, StoreError, SummaryError};

    #[test]
    fn error_display_messages() {
        assert_eq!(
            EntryError::InvalidDate {
                raw: "x".into(),
                value: "2024-13-01".into()
            }
            .to_string(),
            "invalid date '2024-13-01' (expected YYYY-MM-DD)"
        );
        assert_eq!(
            EntryError::InvalidAmount {
                raw: "x".into(),
                value: "abc".into()
            }
            .to_string(),
            "invalid amount 'abc' (expected a number)"
        );
        let malformed = EntryError::Malformed {
            raw: "x".into(),
            fields: 1,
        }
        .to_string();
        assert!(malformed.starts_with("expected 5 fields"));
        assert!(malformed.contains("Date, Category, Amount, Description, Type"));
    }

    #[test]
    fn overflow_names_the_category() {
        let error = SummaryError::Overflow {
            category: "Food".into(),
        };
        assert_eq!(error.to_string(), "total for category 'Food' is out of range");
    }

    #[test]
    fn raw_text_is_preserved() {
        let error = EntryError::InvalidAmount {
            raw: "2024-11-01, Food, abc, Dinner, Expense".into(),
            value: "abc".into(),
        };
        assert_eq!(error.raw(), "2024-11-01, Food, abc, Dinner, Expense");
    }

    #[test]
    fn load_error_names_line_and_cause() {
        let error = StoreError::Load {
            line: 3,
            source: EntryError::InvalidDate {
                raw: "bad".into(),
                value: "bad".into(),
            },
        };
        assert_eq!(
            error.to_string(),
            "invalid ledger row at line 3: invalid date 'bad' (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let error = EntryError::Malformed {
            raw: "only, two".into(),
            fields: 2,
        };
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
