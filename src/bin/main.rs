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

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use expense_ledger_rs::{
    DATE_FORMAT, Engine, Period, ReportResult, StoreError, Submission, SummaryError,
    VisualizationResult,
};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Expense Ledger - Track spending from one-line entries
///
/// Entries are stored in a CSV file which is rewritten after every change.
#[derive(Parser, Debug)]
#[command(name = "expense-ledger-rs")]
#[command(about = "A personal finance ledger with daily, weekly and monthly reports", long_about = None)]
struct Args {
    /// Path to the ledger CSV file
    #[arg(short, long, value_name = "FILE", env = "LEDGER_FILE", default_value = "ledger.csv")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an entry
    ///
    /// Format: "Date, Category, Amount, Description, Type"
    /// Example: expense-ledger-rs add "2024-11-01, Food, 500, Dinner, Expense"
    Add {
        #[arg(value_name = "ENTRY")]
        entry: String,
    },
    /// Category totals for a period
    Report {
        #[arg(value_enum)]
        period: PeriodArg,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Category totals and shares over the whole ledger
    Visualize,
    /// List all entries
    List,
    /// Delete all entries
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PeriodArg {
    Day,
    Week,
    Month,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Day => Period::Day,
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_ledger_rs=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    // Open the ledger; a corrupt file stops here rather than losing rows.
    let engine = match Engine::open_csv(&args.file) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error opening ledger '{}': {}", args.file.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&engine, args.command, std::io::stdout()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Executes one command against the engine, writing user output to `out`.
fn run<W: Write>(engine: &Engine, command: Command, mut out: W) -> Result<(), CliError> {
    match command {
        Command::Add { entry } => match engine.submit(&entry)? {
            Submission::Accepted(_) => writeln!(out, "Entry added.")?,
            Submission::Rejected(e) => return Err(CliError::Rejected(e.to_string())),
        },
        Command::Report { period, date } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            match engine.report(period.into(), today)? {
                ReportResult::Report(report) => write!(out, "{report}")?,
                ReportResult::NoData => writeln!(out, "No data for the selected period.")?,
            }
        }
        Command::Visualize => match engine.visualize()? {
            VisualizationResult::Summary(breakdown) => write!(out, "{breakdown}")?,
            VisualizationResult::NoData => writeln!(out, "No data to visualize.")?,
        },
        Command::List => {
            expense_ledger_rs::persistence::write_entries(&engine.entries(), &mut out)?;
        }
        Command::Reset => {
            engine.reset()?;
            writeln!(out, "All data has been reset.")?;
        }
    }
    Ok(())
}
