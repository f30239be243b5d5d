// Triage Queue - the queue core and its use cases

pub mod admit;


pub use admit::{Admission, AdmitRequest};

use crate::domain::{
    Departure, Entry, PriorityClass, ServedLog, ServedRecord, WaitingSet,
};
use crate::error::Result;
use crate::port::TimeProvider;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Point-in-time counters for a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStats {
    pub waiting: usize,
    pub waiting_critical: usize,
    pub waiting_serious: usize,
    pub waiting_stable: usize,
    pub served: usize,
    pub admitted: u64,
}

/// Everything guarded by the queue lock
///
/// Waiting set and served log live behind one lock so no reader can observe
/// an entry that has left one but not yet reached the other.
#[derive(Debug, Default)]
struct QueueState {
    waiting: WaitingSet,
    served: ServedLog,
    /// Total admissions; doubles as the next admission sequence
    admitted: u64,
}

impl QueueState {
    /// Move an entry that just left the waiting set into the served log
    fn record_departure(&mut self, entry: &Entry, departure: Departure, served_at: DateTime<Utc>) {
        self.served.append(ServedRecord {
            entry: entry.clone(),
            departure,
            served_at,
        });
        self.assert_conserved();
    }

    /// Every admitted entry is either waiting or served, never both or neither
    fn assert_conserved(&self) {
        assert_eq!(
            self.waiting.len() + self.served.len(),
            self.admitted as usize,
            "queue conservation violated: {} waiting + {} served != {} admitted",
            self.waiting.len(),
            self.served.len(),
            self.admitted
        );
    }
}

/// Priority-ordered waiting list with an append-only served log
///
/// One instance per logical queue; share it behind an `Arc`. Mutations take
/// the write lock, reads take the read lock, and every method returns owned
/// snapshots so callers never hold the lock.
pub struct TriageQueue {
    state: RwLock<QueueState>,
    time_provider: Arc<dyn TimeProvider>,
}

impl TriageQueue {
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            state: RwLock::new(QueueState::default()),
            time_provider,
        }
    }

    /// Admit a raw request (validated, lenient about the arrival timestamp)
    pub fn admit(&self, req: AdmitRequest) -> Result<Admission> {
        admit::execute(self, req)
    }

    /// Insert a new entry
    ///
    /// Duplicate identities are accepted and produce independent entries.
    /// Without an explicit arrival the queue clock is read under the write
    /// lock, so clock-assigned arrivals follow admission order.
    pub fn add(
        &self,
        identity: impl Into<String>,
        descriptor: impl Into<String>,
        priority_class: PriorityClass,
        arrival: Option<DateTime<Utc>>,
    ) -> Entry {
        let mut state = self.state.write();
        let arrival = arrival.unwrap_or_else(|| self.time_provider.now());
        let entry = Entry::new(identity, descriptor, priority_class, arrival, state.admitted);

        state.waiting.insert(entry.clone());
        state.admitted += 1;
        state.assert_conserved();

        debug!(
            identity = %entry.identity(),
            priority_class = entry.priority_class().as_u8(),
            sequence = entry.sequence(),
            waiting = state.waiting.len(),
            "Entry admitted"
        );
        entry
    }

    /// Snapshot of waiting entries in dequeue order
    pub fn list(&self) -> Vec<Entry> {
        self.state.read().waiting.iter().cloned().collect()
    }

    /// Entry `take_next` would return, left in place
    pub fn peek(&self) -> Option<Entry> {
        self.state.read().waiting.first().cloned()
    }

    /// Remove the most urgent entry and log it as served
    ///
    /// `None` means the waiting set is empty; it returns immediately.
    pub fn take_next(&self) -> Option<Entry> {
        let mut state = self.state.write();
        let Some(entry) = state.waiting.pop_first() else {
            debug!("take_next on empty queue");
            return None;
        };
        let served_at = self.time_provider.now();
        state.record_departure(&entry, Departure::TakeNext, served_at);

        debug!(
            identity = %entry.identity(),
            priority_class = entry.priority_class().as_u8(),
            waiting = state.waiting.len(),
            "Entry taken"
        );
        Some(entry)
    }

    /// Remove the soonest-due entry with this identity and log it as served
    ///
    /// `None` means no waiting entry carries the identity; nothing changes.
    pub fn remove_by_identity(&self, identity: &str) -> Option<Entry> {
        let mut state = self.state.write();
        let Some(entry) = state.waiting.remove_identity(identity) else {
            debug!(identity = %identity, "remove_by_identity found nothing");
            return None;
        };
        let served_at = self.time_provider.now();
        state.record_departure(&entry, Departure::Removed, served_at);

        debug!(
            identity = %identity,
            priority_class = entry.priority_class().as_u8(),
            waiting = state.waiting.len(),
            "Entry removed"
        );
        Some(entry)
    }

    /// Snapshot of the served log, oldest first
    pub fn history(&self) -> Vec<ServedRecord> {
        self.state.read().served.records().to_vec()
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.state.read();
        QueueStats {
            waiting: state.waiting.len(),
            waiting_critical: state.waiting.count_class(PriorityClass::Critical),
            waiting_serious: state.waiting.count_class(PriorityClass::Serious),
            waiting_stable: state.waiting.count_class(PriorityClass::Stable),
            served: state.served.len(),
            admitted: state.admitted,
        }
    }
}
