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

//! Core shared types: the report period selector and the ledger date format.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for entry input and for the durable store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Report time window selector.
///
/// Every window is anchored at a reference date (normally today) and has an
/// inclusive lower bound only. Entries dated after the reference date still
/// fall inside the week and month windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Entries dated exactly on the reference date.
    Day,
    /// Entries dated on or after `reference - 7 days`.
    Week,
    /// Entries dated on or after `reference - 1 calendar month`.
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    /// Returns the first date included in this period's window.
    ///
    /// Month subtraction is calendar-aware and clamps to the end of the
    /// shorter month (`2024-03-31` becomes `2024-02-29`). A window reaching
    /// past the start of the calendar begins at [`NaiveDate::MIN`].
    pub fn window_start(&self, reference: NaiveDate) -> NaiveDate {
        let start = match self {
            Period::Day => Some(reference),
            Period::Week => reference.checked_sub_days(Days::new(7)),
            Period::Month => reference.checked_sub_months(Months::new(1)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }

    /// Returns `true` if `date` falls inside the window anchored at `reference`.
    pub fn contains(&self, reference: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Period::Day => date == reference,
            Period::Week | Period::Month => date >= self.window_start(reference),
        }
    }

    /// Human readable report title.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "Daily report",
            Period::Week => "Weekly report",
            Period::Month => "Monthly report",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a period name is not `day`, `week` or `month`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period '{0}' (expected day, week or month)")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}
