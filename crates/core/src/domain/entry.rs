// Entry Domain Model

use super::priority::PriorityClass;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Caller-supplied identity of a waiting entry (not unique, not a surrogate key)
pub type Identity = String;

/// Admission counter, assigned by the owning queue in insertion order
pub type Sequence = u64;

/// One waiting unit of work
///
/// All fields are fixed at admission. There is no setter: re-triage is not a
/// supported transition, so the ordering key of a stored entry can never drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    identity: Identity,
    descriptor: String,
    priority_class: PriorityClass,
    arrival_timestamp: DateTime<Utc>,
    sequence: Sequence,
}

impl Entry {
    /// Create a new entry
    ///
    /// # Arguments
    ///
    /// * `identity` - Lookup key used by remove-by-identity
    /// * `descriptor` - Opaque description (e.g. reported condition)
    /// * `priority_class` - Severity tier
    /// * `arrival_timestamp` - Tie-break time (injected, never read from a clock here)
    /// * `sequence` - Admission counter of the owning queue
    pub fn new(
        identity: impl Into<String>,
        descriptor: impl Into<String>,
        priority_class: PriorityClass,
        arrival_timestamp: DateTime<Utc>,
        sequence: Sequence,
    ) -> Self {
        Self {
            identity: identity.into(),
            descriptor: descriptor.into(),
            priority_class,
            arrival_timestamp,
            sequence,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn priority_class(&self) -> PriorityClass {
        self.priority_class
    }

    pub fn arrival_timestamp(&self) -> DateTime<Utc> {
        self.arrival_timestamp
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Ordering key derived purely from stored data
    pub fn order_key(&self) -> OrderKey {
        OrderKey {
            priority_class: self.priority_class,
            arrival_timestamp: self.arrival_timestamp,
            sequence: self.sequence,
        }
    }
}

/// Dequeue order: priority class, then arrival, then admission sequence
///
/// The sequence component only separates entries whose class and arrival are
/// identical, which keeps their relative order stable for the life of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderKey {
    pub priority_class: PriorityClass,
    pub arrival_timestamp: DateTime<Utc>,
    pub sequence: Sequence,
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority_class
            .cmp(&other.priority_class)
            .then_with(|| self.arrival_timestamp.cmp(&other.arrival_timestamp))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
