//! Bounded, file-backed history of forward pricing runs.
//!
//! The engine never touches this store; the CLI feeds it validated
//! `ProductData` plus the engine's rounded `PricingSummary` and the store
//! owns identity, timestamps and the record cap. Records live in a single
//! JSON file, newest first.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use pricing_core::types::{round2, Money, PricingSummary, ProductData};

/// Oldest records are dropped beyond this many.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// One saved calculation: the inputs, the engine's outputs, and the
/// identity/timestamps this store assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub product: ProductData,
    pub results: PricingSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Date,
    Profit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Aggregates over the stored records.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStats {
    pub total_calculations: usize,
    pub total_net_profit: Money,
    pub average_net_profit: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_product: Option<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_product: Option<HistoryEntry>,
}

pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store at `path`. A missing file is an empty store, not an
    /// error; anything unreadable or unparseable is.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read history '{}': {}", path.display(), e))?;
            serde_json::from_str(&contents)
                .map_err(|e| format!("Corrupt history file '{}': {}", path.display(), e))?
        } else {
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    /// Persist the current records to the backing file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write history '{}': {}", self.path.display(), e))?;
        Ok(())
    }

    /// Insert a new record at the front, dropping the oldest beyond the cap.
    pub fn add(&mut self, product: ProductData, results: PricingSummary) -> &HistoryEntry {
        let now = Utc::now();
        self.entries.insert(
            0,
            HistoryEntry {
                id: Uuid::new_v4(),
                product,
                results,
                created_at: now,
                updated_at: now,
            },
        );
        self.entries.truncate(MAX_HISTORY_ITEMS);
        &self.entries[0]
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns false when no record has that id.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Replace a record's inputs and results in place, refreshing its
    /// updated timestamp but keeping identity and creation time.
    pub fn update(&mut self, id: Uuid, product: ProductData, results: PricingSummary) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.product = product;
                entry.results = results;
                entry.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Re-add a copy of an existing record under a "(copy)" name with a
    /// fresh id and timestamps.
    pub fn duplicate(&mut self, id: Uuid) -> Option<&HistoryEntry> {
        let source = self.get(id)?.clone();
        let mut product = source.product;
        product.name = format!("{} (copy)", product.name);
        Some(self.add(product, source.results))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring match on the product name. A blank term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&HistoryEntry> {
        let term = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| term.is_empty() || e.product.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Records sorted by the given key, newest-first ties preserved.
    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| {
            let cmp = match key {
                SortKey::Name => a.product.name.cmp(&b.product.name),
                SortKey::Date => a.created_at.cmp(&b.created_at),
                SortKey::Profit => a.results.net_profit.cmp(&b.results.net_profit),
            };
            match order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            }
        });
        entries
    }

    pub fn stats(&self) -> HistoryStats {
        if self.entries.is_empty() {
            return HistoryStats {
                total_calculations: 0,
                total_net_profit: Decimal::ZERO,
                average_net_profit: Decimal::ZERO,
                best_product: None,
                worst_product: None,
            };
        }

        let total: Decimal = self.entries.iter().map(|e| e.results.net_profit).sum();
        let average = round2(total / Decimal::from(self.entries.len() as i64));
        let best = self
            .entries
            .iter()
            .max_by_key(|e| e.results.net_profit)
            .cloned();
        let worst = self
            .entries
            .iter()
            .min_by_key(|e| e.results.net_profit)
            .cloned();

        HistoryStats {
            total_calculations: self.entries.len(),
            total_net_profit: round2(total),
            average_net_profit: average,
            best_product: best,
            worst_product: worst,
        }
    }
}

/// Default history location: `$PRECIO_HISTORY`, else `~/.precio/history.json`,
/// else the current directory.
pub fn default_history_path() -> PathBuf {
    if let Some(path) = std::env::var_os("PRECIO_HISTORY") {
        return PathBuf::from(path);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".precio").join("history.json"),
        None => PathBuf::from("history.json"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
