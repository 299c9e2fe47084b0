//! Calculation history — an ordered, most-recent-first list of evaluations,
//! persisted as a single JSON file.
//!
//! Items are immutable once recorded and only removed by clear-all. The file
//! is read once at startup and rewritten on every mutation; no versioning or
//! migration.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Where a history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Local keypad evaluation
    Local,
    /// AI bridge response
    Ai,
}

/// One recorded evaluation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique, monotonically increasing id
    pub id: u64,
    pub expression: String,
    pub result: String,
    /// Creation time, UTC milliseconds
    pub timestamp: i64,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl HistoryItem {
    pub fn is_ai(&self) -> bool {
        self.origin == Origin::Ai
    }
}

/// The session's history list, most-recent-first.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        Self { items }
    }

    /// Most-recent-first view of the recorded items.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record an evaluation at the front of the list.
    pub fn record(
        &mut self,
        expression: &str,
        result: &str,
        origin: Origin,
        explanation: Option<String>,
    ) -> &HistoryItem {
        let item = HistoryItem {
            id: self.next_id(),
            expression: expression.to_string(),
            result: result.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            origin,
            explanation: explanation.filter(|e| !e.is_empty()),
        };
        self.items.insert(0, item);
        &self.items[0]
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // Wall-clock millis, bumped past the newest existing id so ids stay
    // strictly increasing even within one millisecond.
    fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        match self.items.iter().map(|i| i.id).max() {
            Some(max) => now.max(max + 1),
            None => now,
        }
    }
}

/// Persistence for the history list — one JSON array on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<config_dir>/tally/history.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tally")
            .join("history.json")
    }

    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the persisted list. A missing or unreadable file yields an empty
    /// log rather than an error.
    pub fn load(&self) -> HistoryLog {
        let items = fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        HistoryLog::from_items(items)
    }

    /// Overwrite the persisted list with the current state.
    pub fn save(&self, log: &HistoryLog) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(log.items()).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}
