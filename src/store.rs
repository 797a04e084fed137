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

//! Ledger storage.
//!
//! [`LedgerStore`] owns the ordered entry sequence and writes it through a
//! [`Persistence`] backend after every mutation.
//!
//! # Example
//!
//! ```
//! use expense_ledger_rs::{Entry, LedgerStore, MemoryBackend};
//!
//! let store = LedgerStore::open(MemoryBackend::new()).unwrap();
//! store.append(Entry::parse("2024-11-01, Food, 500, Dinner, Expense").unwrap()).unwrap();
//! assert_eq!(store.snapshot().len(), 1);
//! ```

use crate::entry::Entry;
use crate::error::StoreError;
use crate::persistence::Persistence;
use parking_lot::Mutex;
use std::sync::Arc;

/// Read-only view of the ledger at one point in time.
pub type Snapshot = Arc<Vec<Entry>>;

/// Owner of the ordered ledger.
///
/// `append` and `reset` hold the ledger lock across both the in-memory
/// mutation and the following save, so concurrent callers never interleave
/// their writes to the durable store.
pub struct LedgerStore {
    entries: Mutex<Snapshot>,
    backend: Box<dyn Persistence>,
}

impl LedgerStore {
    /// Restores the ledger from `backend`.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`] from [`Persistence::load`]. A durable store with an
    /// unparseable row stops startup instead of dropping the row.
    pub fn open(backend: impl Persistence + 'static) -> Result<Self, StoreError> {
        let entries = backend.load()?;
        Ok(Self {
            entries: Mutex::new(Arc::new(entries)),
            backend: Box::new(backend),
        })
    }

    /// Appends an entry and persists the ledger.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the save fails. The entry stays in memory
    /// in that case; only durability is behind.
    pub fn append(&self, entry: Entry) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        Arc::make_mut(&mut entries).push(entry);
        tracing::debug!(entries = entries.len(), "entry appended");
        self.persist(&entries)
    }

    /// Clears the ledger and persists the empty table.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the save fails. The in-memory ledger is
    /// empty regardless.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        *entries = Arc::new(Vec::new());
        tracing::info!("ledger reset");
        self.persist(&entries)
    }

    /// Returns the current ledger.
    ///
    /// The snapshot is shared, not copied; later mutations do not affect it.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn persist(&self, entries: &[Entry]) -> Result<(), StoreError> {
        self.backend.save(entries).inspect_err(|e| {
            tracing::warn!(error = %e, "ledger save failed, durable store is behind memory");
        })
    }
}
