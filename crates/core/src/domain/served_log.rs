// Served Log Domain Model (audit trail)

use super::entry::Entry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an entry left the waiting set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Departure {
    TakeNext,
    Removed,
}

impl std::fmt::Display for Departure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Departure::TakeNext => write!(f, "TAKE_NEXT"),
            Departure::Removed => write!(f, "REMOVED"),
        }
    }
}

/// One audit record: the entry exactly as it waited, plus how and when it left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRecord {
    pub entry: Entry,
    pub departure: Departure,
    pub served_at: DateTime<Utc>,
}

/// Append-only sequence of served records, oldest first
///
/// No remove, clear or reorder: records only ever accumulate.
#[derive(Debug, Default)]
pub struct ServedLog {
    records: Vec<ServedRecord>,
}

impl ServedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ServedRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ServedRecord] {
        &self.records
    }
}
