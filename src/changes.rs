//! Bounded log of recent mutations
//!
//! Clients poll `timecamp://changes` to notice timers started or stopped
//! and entries created by other calls. Nothing here is persisted.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Default number of events kept
pub const DEFAULT_CAPACITY: usize = 50;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    TimerStarted,
    TimerStopped,
    EntryCreated,
}

/// One recorded mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub timestamp: DateTime<Utc>,
    pub details: BTreeMap<String, Value>,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            timestamp,
            details: BTreeMap::new(),
        }
    }

    /// Attach a detail. `None`-like values are stored as JSON null.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Fixed-capacity ring of change events, oldest evicted first
#[derive(Debug)]
pub struct ChangeLog {
    events: Mutex<VecDeque<ChangeEvent>>,
    capacity: usize,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangeLog {
    /// Create an empty log. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ChangeEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event, evicting the oldest when full.
    pub fn record(&self, event: ChangeEvent) {
        log::debug!("Recording change: {:?}", event.kind);
        let mut events = self.lock();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// All retained events, newest first
    pub fn recent(&self) -> Vec<ChangeEvent> {
        self.lock().iter().rev().cloned().collect()
    }

    /// Events strictly newer than `timestamp`, newest first
    pub fn since(&self, timestamp: DateTime<Utc>) -> Vec<ChangeEvent> {
        self.lock()
            .iter()
            .rev()
            .filter(|e| e.timestamp > timestamp)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
