//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Request to add an entry to the waiting list
#[derive(Debug, Clone, Serialize)]
pub struct AddRequest {
    pub identity: String,
    pub descriptor: String,
    /// 1 = Critical, 2 = Serious, 3 = Stable
    pub priority_class: i64,
    /// `YYYY-MM-DD HH:MM:SS` (UTC) or RFC 3339; omitted means "now"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_timestamp: Option<String>,
}

impl AddRequest {
    pub fn new(
        identity: impl Into<String>,
        descriptor: impl Into<String>,
        priority_class: i64,
    ) -> Self {
        Self {
            identity: identity.into(),
            descriptor: descriptor.into(),
            priority_class,
            arrival_timestamp: None,
        }
    }

    pub fn arrived_at(mut self, timestamp: impl Into<String>) -> Self {
        self.arrival_timestamp = Some(timestamp.into());
        self
    }
}

/// A waiting or served entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub identity: String,
    pub descriptor: String,
    pub priority_class: u8,
    pub severity_label: String,
    pub arrival_timestamp: String,
}

/// Response from add operation
#[derive(Debug, Clone, Deserialize)]
pub struct AddResponse {
    pub entry: Entry,
    pub arrival_substituted: bool,
}

/// Response from list operation
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub entries: Vec<Entry>,
    pub count: usize,
}

/// One served-log record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServedRecord {
    #[serde(flatten)]
    pub entry: Entry,
    /// `TAKE_NEXT` or `REMOVED`
    pub departure: String,
    pub served_at: String,
}

/// Response from history operation
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub records: Vec<ServedRecord>,
    pub count: usize,
}

/// Response from stats operation
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub waiting: usize,
    pub waiting_critical: usize,
    pub waiting_serious: usize,
    pub waiting_stable: usize,
    pub served: usize,
    pub admitted: u64,
    pub uptime_seconds: u64,
}
