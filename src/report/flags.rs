use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::schedule::OccurrenceId;

/// Occurrence ids the user removed from their series without ending the
/// whole series. Every reducer filters by this set before totalling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SkipSet(HashSet<OccurrenceId>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &OccurrenceId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: OccurrenceId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &OccurrenceId) -> bool {
        self.0.remove(id)
    }

    /// Flips membership; returns the new state. Deleting a single
    /// occurrence from a series is a skip toggle.
    pub fn toggle(&mut self, id: OccurrenceId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<OccurrenceId> for SkipSet {
    fn from_iter<I: IntoIterator<Item = OccurrenceId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Occurrence ids marked as paid/received. Consumed by overdue detection
/// and payment-status counts only, never by the expander.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PaidSet(HashSet<OccurrenceId>);

impl PaidSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &OccurrenceId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: OccurrenceId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &OccurrenceId) -> bool {
        self.0.remove(id)
    }

    /// Flips membership; returns the new state.
    pub fn toggle(&mut self, id: OccurrenceId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<OccurrenceId> for PaidSet {
    fn from_iter<I: IntoIterator<Item = OccurrenceId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
