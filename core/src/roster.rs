//! Roster store: the session's in-memory subscriber set.
//!
//! RULE: The roster is read-only once built. Replacing it means
//! building a new Roster, never editing records in place.

use crate::{subscriber::Subscriber, types::SubscriberId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where the records came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterOrigin {
    Fetched { source: String },
    Fallback { seed: u64 },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    origin:      RosterOrigin,
    subscribers: Vec<Subscriber>,
}

impl Default for Roster {
    fn default() -> Self {
        Self { origin: RosterOrigin::Empty, subscribers: Vec::new() }
    }
}

impl Roster {
    /// Build from records in source order. Duplicate ids keep the first
    /// occurrence; later ones are dropped with a warning.
    pub fn new(origin: RosterOrigin, records: Vec<Subscriber>) -> Self {
        let mut seen: HashSet<SubscriberId> = HashSet::with_capacity(records.len());
        let mut subscribers = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id) {
                subscribers.push(record);
            } else {
                log::warn!("roster: dropping duplicate subscriber id={} ({})", record.id, record.email);
            }
        }
        Self { origin, subscribers }
    }

    pub fn origin(&self) -> &RosterOrigin {
        &self.origin
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, RosterOrigin::Fallback { .. })
    }

    pub fn as_slice(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn get(&self, id: SubscriberId) -> Option<&Subscriber> {
        self.subscribers.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscriber> {
        self.subscribers.iter()
    }
}
