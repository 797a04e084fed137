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

//! Durable storage for the ledger.
//!
//! The [`Persistence`] trait is the boundary between [`LedgerStore`] and
//! whatever keeps the entries across restarts. [`CsvFile`] is the default
//! backend; [`MemoryBackend`] keeps a copy in process and is used where no
//! file should be touched.
//!
//! # CSV Format
//!
//! ```csv
//! Date,Category,Amount,Description,Type
//! 2024-11-01,Food,500,Dinner,Expense
//! 2024-11-02,Transport,50,"Bus, return",Expense
//! ```
//!
//! [`LedgerStore`]: crate::LedgerStore

use crate::entry::Entry;
use crate::error::StoreError;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Column names of the durable table, in field order.
pub const HEADER: [&str; 5] = ["Date", "Category", "Amount", "Description", "Type"];

const TMP_SUFFIX: &str = "tmp";

/// Loads and saves the full ledger.
///
/// Implementations must round-trip: `save(entries)` followed by `load()`
/// yields an equal sequence in the same order.
pub trait Persistence: Send + Sync {
    /// Reads the whole ledger. A store that does not exist yet is empty.
    fn load(&self) -> Result<Vec<Entry>, StoreError>;

    /// Replaces the stored ledger with `entries`.
    fn save(&self, entries: &[Entry]) -> Result<(), StoreError>;
}

/// CSV file backend with atomic replacement on save.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(TMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl Persistence for CsvFile {
    fn load(&self) -> Result<Vec<Entry>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no ledger file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries = read_entries(BufReader::new(file))?;
        tracing::info!(path = %self.path.display(), entries = entries.len(), "ledger loaded");
        Ok(entries)
    }

    fn save(&self, entries: &[Entry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write the full table next to the target, then swap it in.
        let tmp = self.tmp_path();
        let mut file = BufWriter::new(File::create(&tmp)?);
        write_entries(entries, &mut file)?;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "ledger saved");
        Ok(())
    }
}

/// In-process backend holding the last saved ledger.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Vec<Entry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose `load` returns `entries`.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            saved: Mutex::new(entries),
        }
    }

    /// Returns a copy of the last saved ledger.
    pub fn saved(&self) -> Vec<Entry> {
        self.saved.lock().clone()
    }
}

impl Persistence for MemoryBackend {
    fn load(&self) -> Result<Vec<Entry>, StoreError> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, entries: &[Entry]) -> Result<(), StoreError> {
        *self.saved.lock() = entries.to_vec();
        Ok(())
    }
}

/// Reads a ledger table from CSV.
///
/// The header must name the five columns in order (surrounding whitespace
/// in header names is ignored). Every row goes through the same validation
/// as user input; the first bad row aborts the load.
///
/// # Errors
///
/// - [`StoreError::Header`] - Header row is missing or does not match [`HEADER`].
/// - [`StoreError::Load`] - A row has the wrong field count, a bad date or a bad amount.
/// - [`StoreError::Csv`] - The input is not readable CSV.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<Entry>, StoreError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true) // Field count is checked per row below
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(StoreError::Header {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut entries = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let raw = record.iter().collect::<Vec<_>>().join(crate::entry::FIELD_DELIMITER);
        let fields: Vec<&str> = record.iter().collect();
        let entry = Entry::from_fields(&raw, &fields).map_err(|source| {
            tracing::error!(line, error = %source, "unparseable ledger row");
            StoreError::Load { line, source }
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Writes a ledger table as CSV, header first.
///
/// An empty ledger produces the header row alone.
pub fn write_entries<W: Write>(entries: &[Entry], writer: W) -> Result<(), StoreError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(HEADER)?;
    for entry in entries {
        wtr.serialize(entry)?;
    }

    wtr.flush()?;
    Ok(())
}
