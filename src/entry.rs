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

//! Ledger entries and their validation.
//!
//! An [`Entry`] is built from one line of free text in the form
//!
//! ```text
//! Date, Category, Amount, Description, Type
//! 2024-11-01, Food, 500, Dinner, Expense
//! ```
//!
//! Fields are split on the literal `", "` delimiter. Only the date and the
//! amount are validated; the remaining fields are kept verbatim.
//!
//! # Example
//!
//! ```
//! use expense_ledger_rs::Entry;
//! use rust_decimal_macros::dec;
//!
//! let entry = Entry::parse("2024-11-01, Food, 500, Dinner, Expense").unwrap();
//! assert_eq!(entry.category(), "Food");
//! assert_eq!(entry.amount(), dec!(500));
//! ```

use crate::base::DATE_FORMAT;
use crate::error::EntryError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Delimiter between the fields of a raw entry.
pub const FIELD_DELIMITER: &str = ", ";

/// Number of fields in a raw entry.
pub const FIELD_COUNT: usize = 5;

/// One validated transaction record.
///
/// Entries are immutable once built. Every entry holds a real calendar date
/// and a finite amount; there is no way to construct a partially valid one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: Decimal,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Type")]
    kind: String,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
            kind: kind.into(),
        }
    }

    /// Parses and validates one raw transaction description.
    ///
    /// # Errors
    ///
    /// - [`EntryError::Malformed`] - Input is not exactly five `", "`-separated fields.
    /// - [`EntryError::InvalidDate`] - Date is not a valid `YYYY-MM-DD` date.
    /// - [`EntryError::InvalidAmount`] - Amount is not a finite number.
    pub fn parse(raw: &str) -> Result<Self, EntryError> {
        let fields: Vec<&str> = raw.split(FIELD_DELIMITER).collect();
        Self::from_fields(raw, &fields)
    }

    /// Validates already split fields in `date, category, amount, description, type` order.
    ///
    /// `raw` is the text reported back in any error.
    pub fn from_fields<S: AsRef<str>>(raw: &str, fields: &[S]) -> Result<Self, EntryError> {
        let [date, category, amount, description, kind] = fields else {
            return Err(EntryError::Malformed {
                raw: raw.to_string(),
                fields: fields.len(),
            });
        };

        let date = parse_date(date.as_ref()).ok_or_else(|| EntryError::InvalidDate {
            raw: raw.to_string(),
            value: date.as_ref().to_string(),
        })?;
        let amount = parse_amount(amount.as_ref()).ok_or_else(|| EntryError::InvalidAmount {
            raw: raw.to_string(),
            value: amount.as_ref().to_string(),
        })?;

        Ok(Self::new(
            date,
            category.as_ref(),
            amount,
            description.as_ref(),
            kind.as_ref(),
        ))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Free-text tag such as `Expense` or `Income`.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl FromStr for Entry {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses a finite decimal amount.
///
/// Accepts plain (`-12.50`) and scientific (`1.5e3`) notation. Values are
/// never rounded: anything that does not fit a [`Decimal`] exactly (more than
/// 28 decimal places, `nan`, `inf`, overflow) is rejected in either notation.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.contains(['e', 'E']) {
        Decimal::from_scientific(value).ok()
    } else {
        Decimal::from_str_exact(value).ok()
    }
}
