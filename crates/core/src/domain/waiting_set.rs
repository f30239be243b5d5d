//! Waiting Set: ordered collection of entries not yet served.
//!
//! Combines a BTreeMap keyed by [`OrderKey`] (O(log n) insert, extract-min and
//! targeted delete) with an identity index so remove-by-identity never scans.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::entry::{Entry, OrderKey};
use super::priority::PriorityClass;

#[derive(Debug, Default)]
pub struct WaitingSet {
    /// Single source of truth for entry data, in dequeue order
    ordered: BTreeMap<OrderKey, Entry>,
    /// identity -> keys of every waiting entry carrying it
    by_identity: HashMap<String, BTreeSet<OrderKey>>,
}

impl WaitingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Insert an entry - O(log n)
    ///
    /// Keys are unique per queue because the sequence component is.
    pub fn insert(&mut self, entry: Entry) {
        let key = entry.order_key();
        self.by_identity
            .entry(entry.identity().to_string())
            .or_default()
            .insert(key);
        let previous = self.ordered.insert(key, entry);
        assert!(previous.is_none(), "duplicate order key {:?}", key);
    }

    /// Entry that `pop_first` would return
    pub fn first(&self) -> Option<&Entry> {
        self.ordered.values().next()
    }

    /// Remove the most urgent entry - O(log n)
    pub fn pop_first(&mut self) -> Option<Entry> {
        let (key, entry) = self.ordered.pop_first()?;
        self.unindex(entry.identity(), &key);
        Some(entry)
    }

    /// Remove the soonest-due entry carrying `identity` - O(log n)
    ///
    /// When several entries share the identity, the one with the smallest order
    /// key goes, which is the one `pop_first` would have reached first.
    pub fn remove_identity(&mut self, identity: &str) -> Option<Entry> {
        let key = *self.by_identity.get(identity)?.first()?;
        let entry = self.ordered.remove(&key);
        assert!(
            entry.is_some(),
            "identity index points at missing entry {:?}",
            key
        );
        self.unindex(identity, &key);
        entry
    }

    /// Iterate in dequeue order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.ordered.values()
    }

    /// Waiting count for one priority class
    pub fn count_class(&self, class: PriorityClass) -> usize {
        self.ordered
            .keys()
            .filter(|key| key.priority_class == class)
            .count()
    }

    fn unindex(&mut self, identity: &str, key: &OrderKey) {
        if let Some(keys) = self.by_identity.get_mut(identity) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_identity.remove(identity);
            }
        }
    }
}
