//! Cached roster snapshots, keyed by event id.

use crate::models::participant::{EventId, Participant};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Participants as returned by one directory fetch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RosterSnapshot {
    pub participants: Vec<Participant>,
    pub fetched_at: DateTime<Utc>,
}

impl RosterSnapshot {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            fetched_at: Utc::now(),
        }
    }
}

/// Result of the last fetch for an event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterState {
    Loaded(RosterSnapshot),
    /// Fetch failed; the working set is empty but this is not "zero participants".
    Failed { reason: String, at: DateTime<Utc> },
}

impl RosterState {
    pub fn failed(reason: impl Into<String>) -> Self {
        RosterState::Failed {
            reason: reason.into(),
            at: Utc::now(),
        }
    }

    /// Participants to filter and draw from (empty after a failed fetch).
    pub fn participants(&self) -> &[Participant] {
        match self {
            RosterState::Loaded(snapshot) => &snapshot.participants,
            RosterState::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RosterState::Failed { .. })
    }

    fn updated_at(&self) -> DateTime<Utc> {
        match self {
            RosterState::Loaded(snapshot) => snapshot.fetched_at,
            RosterState::Failed { at, .. } => *at,
        }
    }
}

/// Per-event cache entry: the roster plus how often it has been fetched.
#[derive(Clone, Debug)]
struct CacheEntry {
    state: RosterState,
    fetches: u32,
}

/// Keyed roster store: populated on first access, replaced on invalidate, evicted on teardown.
#[derive(Debug, Default)]
pub struct RosterCache {
    entries: HashMap<EventId, CacheEntry>,
    /// Events marked stale by `invalidate`; the next `get` reports a miss.
    stale: HashSet<EventId>,
}

impl RosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh roster for an event, or None if missing or invalidated.
    pub fn get(&self, event: &str) -> Option<&RosterState> {
        if self.stale.contains(event) {
            return None;
        }
        self.entries.get(event).map(|e| &e.state)
    }

    /// Store the result of a fetch, clearing any stale mark.
    pub fn insert(&mut self, event: impl Into<EventId>, state: RosterState) {
        let event = event.into();
        self.stale.remove(&event);
        match self.entries.entry(event) {
            Entry::Occupied(mut o) => {
                let entry = o.get_mut();
                entry.state = state;
                entry.fetches += 1;
            }
            Entry::Vacant(v) => {
                v.insert(CacheEntry { state, fetches: 1 });
            }
        }
    }

    /// Mark an event's roster stale so it gets re-fetched. Returns false if nothing was cached.
    ///
    /// Idempotent: invalidating twice before the re-fetch is the same as once.
    pub fn invalidate(&mut self, event: &str) -> bool {
        if !self.entries.contains_key(event) {
            return false;
        }
        self.stale.insert(event.to_string());
        true
    }

    /// Drop the entry entirely (view teardown).
    pub fn evict(&mut self, event: &str) {
        self.entries.remove(event);
        self.stale.remove(event);
    }

    /// Evict entries not refreshed within `ttl`. Returns how many were removed.
    pub fn evict_idle(&mut self, ttl: Duration) -> usize {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| now - e.state.updated_at() < ttl);
        let entries = &self.entries;
        self.stale.retain(|event| entries.contains_key(event));
        before - self.entries.len()
    }

    /// Number of fetches stored for this event since it was first cached.
    pub fn fetch_count(&self, event: &str) -> u32 {
        self.entries.get(event).map_or(0, |e| e.fetches)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> RosterState {
        let people = (0..n)
            .map(|i| Participant::new(format!("P{i}"), format!("p{i}@x.com"), format!("p{i}")))
            .collect();
        RosterState::Loaded(RosterSnapshot::new(people))
    }

    #[test]
    fn invalidate_hides_entry_until_next_insert() {
        let mut cache = RosterCache::new();
        cache.insert("e1", roster(3));
        assert!(cache.invalidate("e1"));
        assert!(cache.invalidate("e1"));
        assert!(cache.get("e1").is_none());
        cache.insert("e1", roster(4));
        assert_eq!(cache.get("e1").map(|s| s.participants().len()), Some(4));
        assert_eq!(cache.fetch_count("e1"), 2);
    }

    #[test]
    fn invalidate_unknown_event_is_noop() {
        let mut cache = RosterCache::new();
        assert!(!cache.invalidate("nope"));
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_fetch_is_empty_but_distinguishable() {
        let mut cache = RosterCache::new();
        cache.insert("e1", RosterState::failed("timeout"));
        cache.insert("e2", roster(0));
        let failed = cache.get("e1").unwrap();
        let empty = cache.get("e2").unwrap();
        assert!(failed.participants().is_empty());
        assert!(empty.participants().is_empty());
        assert!(failed.is_failed());
        assert!(!empty.is_failed());
    }

    #[test]
    fn evict_idle_keeps_fresh_entries() {
        let mut cache = RosterCache::new();
        cache.insert("e1", roster(1));
        assert_eq!(cache.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(cache.evict_idle(Duration::ZERO), 1);
        assert!(cache.is_empty());
    }
}
