use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

use pricing_core::types::Money;

use crate::history::{default_history_path, HistoryEntry, HistoryStore, SortKey, SortOrder};

/// Arguments for browsing and managing saved calculations
#[derive(Args)]
pub struct HistoryArgs {
    /// History file location (defaults to ~/.precio/history.json)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved calculations, newest first
    List {
        /// Filter by product name (case-insensitive substring)
        #[arg(long)]
        search: Option<String>,

        /// Sort key (defaults to insertion order, newest first)
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        order: SortOrder,
    },
    /// Show one saved calculation in full
    Show { id: Uuid },
    /// Delete one saved calculation
    Remove { id: Uuid },
    /// Re-add a saved calculation under a "(copy)" name
    Duplicate { id: Uuid },
    /// Delete every saved calculation
    Clear,
    /// Aggregate profit statistics over the store
    Stats,
}

/// Compact row for list output.
#[derive(Serialize)]
struct ListRow {
    id: Uuid,
    name: String,
    saved_at: DateTime<Utc>,
    minimum_price: Money,
    ideal_price: Money,
    net_profit: Money,
}

impl From<&HistoryEntry> for ListRow {
    fn from(entry: &HistoryEntry) -> Self {
        ListRow {
            id: entry.id,
            name: entry.product.name.clone(),
            saved_at: entry.created_at,
            minimum_price: entry.results.minimum_price,
            ideal_price: entry.results.ideal_price,
            net_profit: entry.results.net_profit,
        }
    }
}

pub fn run_history(args: HistoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = args.file.unwrap_or_else(default_history_path);
    let mut store = HistoryStore::open(&path)?;

    match args.action {
        HistoryAction::List {
            search,
            sort,
            order,
        } => {
            let term = search.unwrap_or_default();
            let entries = match sort {
                Some(key) => {
                    let needle = term.trim().to_lowercase();
                    store
                        .sorted(key, order)
                        .into_iter()
                        .filter(|e| {
                            needle.is_empty() || e.product.name.to_lowercase().contains(&needle)
                        })
                        .collect()
                }
                None => store.search(&term),
            };
            let rows: Vec<ListRow> = entries.into_iter().map(ListRow::from).collect();
            Ok(serde_json::to_value(rows)?)
        }
        HistoryAction::Show { id } => {
            let entry = store
                .get(id)
                .ok_or_else(|| format!("No saved calculation with id {id}"))?;
            Ok(serde_json::to_value(entry)?)
        }
        HistoryAction::Remove { id } => {
            if !store.remove(id) {
                return Err(format!("No saved calculation with id {id}").into());
            }
            store.save()?;
            Ok(serde_json::json!({ "removed": id }))
        }
        HistoryAction::Duplicate { id } => {
            let entry = store
                .duplicate(id)
                .ok_or_else(|| format!("No saved calculation with id {id}"))?;
            let value = serde_json::to_value(entry)?;
            store.save()?;
            Ok(value)
        }
        HistoryAction::Clear => {
            let cleared = store.len();
            store.clear();
            store.save()?;
            Ok(serde_json::json!({ "cleared": cleared }))
        }
        HistoryAction::Stats => Ok(serde_json::to_value(store.stats())?),
    }
}
