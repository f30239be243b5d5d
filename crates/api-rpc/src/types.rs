//! RPC Request/Response Types
//!
//! Explicit wire contract for the v1 methods. Domain types never serialize
//! directly, so internal fields (such as the admission sequence) stay off the wire.

use serde::{Deserialize, Serialize};
use triage_core::domain::timestamp::format_canonical;
use triage_core::domain::{Departure, Entry, ServedRecord};
use triage_core::QueueStats;

/// Wire form of a waiting or served entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub identity: String,
    pub descriptor: String,
    pub priority_class: u8,
    pub severity_label: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub arrival_timestamp: String,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        Self {
            identity: entry.identity().to_string(),
            descriptor: entry.descriptor().to_string(),
            priority_class: entry.priority_class().as_u8(),
            severity_label: entry.priority_class().label().to_string(),
            arrival_timestamp: format_canonical(entry.arrival_timestamp()),
        }
    }
}

/// Wire form of a served-log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServedRecordView {
    #[serde(flatten)]
    pub entry: EntryView,
    pub departure: Departure,
    pub served_at: String,
}

impl From<&ServedRecord> for ServedRecordView {
    fn from(record: &ServedRecord) -> Self {
        Self {
            entry: EntryView::from(&record.entry),
            departure: record.departure,
            served_at: format_canonical(record.served_at),
        }
    }
}

/// triage.add.v1 - Admit an entry
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub identity: String,
    #[serde(default)]
    pub descriptor: String,
    pub priority_class: i64,
    #[serde(default)]
    pub arrival_timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    pub entry: EntryView,
    /// True when the supplied arrival timestamp was unparseable and replaced
    pub arrival_substituted: bool,
}

/// triage.list.v1 - Waiting entries in dequeue order
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub entries: Vec<EntryView>,
    pub count: usize,
}

/// triage.remove.v1 - Remove by identity
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub identity: String,
}

/// triage.history.v1 - Served log, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<ServedRecordView>,
    pub count: usize,
}

/// admin.stats.v1 - Queue counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub waiting: usize,
    pub waiting_critical: usize,
    pub waiting_serious: usize,
    pub waiting_stable: usize,
    pub served: usize,
    pub admitted: u64,
    pub uptime_seconds: u64,
}

impl StatsResponse {
    pub fn new(stats: QueueStats, uptime_seconds: u64) -> Self {
        Self {
            waiting: stats.waiting,
            waiting_critical: stats.waiting_critical,
            waiting_serious: stats.waiting_serious,
            waiting_stable: stats.waiting_stable,
            served: stats.served,
            admitted: stats.admitted,
            uptime_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_core::domain::timestamp::parse_timestamp;
    use triage_core::domain::PriorityClass;

    fn entry_at(raw: &str) -> Entry {
        let ts = parse_timestamp(raw).unwrap();
        Entry::new("Bed 4", "fracture", PriorityClass::Serious, ts, 42)
    }

    #[test]
    fn test_entry_view_wire_shape() {
        let entry = entry_at("2024-02-03 04:05:06.789");
        let value = serde_json::to_value(EntryView::from(&entry)).unwrap();

        assert_eq!(
            value,
            json!({
                "identity": "Bed 4",
                "descriptor": "fracture",
                "priority_class": 2,
                "severity_label": "Serious",
                "arrival_timestamp": "2024-02-03 04:05:06",
            })
        );
    }

    #[test]
    fn test_served_record_view_flattens_entry() {
        let record = ServedRecord {
            entry: entry_at("2024-02-03 04:05:06"),
            departure: Departure::Removed,
            served_at: parse_timestamp("2024-02-03 05:00:00").unwrap(),
        };
        let value = serde_json::to_value(ServedRecordView::from(&record)).unwrap();

        assert_eq!(value["identity"], "Bed 4");
        assert_eq!(value["priority_class"], 2);
        assert_eq!(value["departure"], "REMOVED");
        assert_eq!(value["served_at"], "2024-02-03 05:00:00");
        assert!(value.get("sequence").is_none());
    }
}
