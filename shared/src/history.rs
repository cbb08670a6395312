//! Capacity-bounded, newest-first history sequences

use crate::models::LoggedEntry;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// Newest-first sequence of logged entries holding at most `cap` items.
///
/// Appending beyond the cap silently drops the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySequence<T> {
    entries: VecDeque<LoggedEntry<T>>,
    cap: usize,
}

impl<T> HistorySequence<T> {
    /// Create an empty sequence. A cap of 0 is raised to 1.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    /// Rebuild a sequence from stored entries, already newest first
    pub fn from_entries(cap: usize, entries: Vec<LoggedEntry<T>>) -> Self {
        let mut sequence = Self::new(cap);
        sequence.entries = entries.into();
        sequence.entries.truncate(sequence.cap);
        sequence
    }

    /// Stamp `record` with a fresh id and the current time and prepend it
    pub fn append(&mut self, record: T) -> &LoggedEntry<T> {
        self.append_at(record, Utc::now())
    }

    pub fn append_at(&mut self, record: T, recorded_at: DateTime<Utc>) -> &LoggedEntry<T> {
        let mut entry = LoggedEntry::at(record, recorded_at);
        while self.get(entry.id).is_some() {
            entry.id = Uuid::new_v4();
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
        &self.entries[0]
    }

    /// Remove an entry by id
    pub fn remove(&mut self, id: Uuid) -> Option<LoggedEntry<T>> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        self.entries.remove(index)
    }

    pub fn get(&self, id: Uuid) -> Option<&LoggedEntry<T>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries newest first, optionally limited
    pub fn list(&self, limit: Option<usize>) -> impl Iterator<Item = &LoggedEntry<T>> + '_ {
        self.entries.iter().take(limit.unwrap_or(usize::MAX))
    }

    /// The most recent `n` entries, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LoggedEntry<T>> + '_ {
        self.entries.iter().take(n)
    }

    pub fn latest(&self) -> Option<&LoggedEntry<T>> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Underlying storage, for serialization
    pub fn entries(&self) -> &VecDeque<LoggedEntry<T>> {
        &self.entries
    }
}
