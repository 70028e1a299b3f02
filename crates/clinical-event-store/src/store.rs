//! In-memory implementation of the `EventStore` port.
//!
//! Stores events in three structures, mirroring the reference
//! implementation this engine is grounded on:
//! - `streams`: aggregate_id → events ordered by version.
//! - `by_id`: event_id → event, for deduplication and existence checks.
//! - `all_events`: every event in insertion (persist) order, for
//!   `read_all_events`.
//!
//! A single `Mutex` guards all three so `append` (the only mutator) stays
//! atomic with respect to concurrent readers, consistent with this
//! engine's "single lock around append + dispatch" concurrency contract.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use clinical_core::{AggregateId, ConcurrencyError, DomainEvent, EventStore};

#[derive(Default)]
struct Inner {
    streams: HashMap<Uuid, Vec<DomainEvent>>,
    by_id: HashMap<Uuid, DomainEvent>,
    all_events: Vec<DomainEvent>,
    last_recorded_at: Option<DateTime<Utc>>,
}

/// Append-only, in-memory event store. Development/test adapter; a
/// persistent adapter would implement the same `EventStore` trait.
#[derive(Default)]
pub struct InMemoryEventStore {
    inner: Mutex<Inner>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_recorded_at(inner: &mut Inner) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match inner.last_recorded_at {
            Some(last) if now <= last => last + chrono::Duration::nanoseconds(1),
            _ => now,
        };
        inner.last_recorded_at = Some(stamp);
        stamp
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: DomainEvent) -> Result<DomainEvent, ConcurrencyError> {
        let mut inner = self.inner.lock().expect("event store mutex poisoned");

        if let Some(existing) = inner.by_id.get(&event.event_id) {
            return Ok(existing.clone());
        }

        let aggregate_uuid: Uuid = event.aggregate_id.into();
        let expected_version = inner
            .streams
            .get(&aggregate_uuid)
            .map_or(0, |s| s.len() as u64)
            + 1;

        if event.aggregate_version != expected_version {
            return Err(ConcurrencyError::new(
                aggregate_uuid,
                expected_version,
                event.aggregate_version,
            ));
        }

        let recorded_at = Self::next_recorded_at(&mut inner);
        let persisted = event.with_recorded_at(recorded_at);

        inner
            .streams
            .entry(aggregate_uuid)
            .or_default()
            .push(persisted.clone());
        inner.by_id.insert(persisted.event_id, persisted.clone());
        inner.all_events.push(persisted.clone());

        Ok(persisted)
    }

    fn read_stream(&self, aggregate_id: AggregateId) -> Vec<DomainEvent> {
        let inner = self.inner.lock().expect("event store mutex poisoned");
        inner
            .streams
            .get(&aggregate_id.into())
            .cloned()
            .unwrap_or_default()
    }

    fn read_stream_from(&self, aggregate_id: AggregateId, from_version: u64) -> Vec<DomainEvent> {
        self.read_stream(aggregate_id)
            .into_iter()
            .filter(|e| e.aggregate_version >= from_version)
            .collect()
    }

    fn read_all_events(&self) -> Vec<DomainEvent> {
        let inner = self.inner.lock().expect("event store mutex poisoned");
        inner.all_events.clone()
    }

    fn stream_version(&self, aggregate_id: AggregateId) -> u64 {
        let inner = self.inner.lock().expect("event store mutex poisoned");
        inner
            .streams
            .get(&aggregate_id.into())
            .and_then(|s| s.last())
            .map_or(0, |e| e.aggregate_version)
    }

    fn event_exists(&self, event_id: Uuid) -> bool {
        let inner = self.inner.lock().expect("event store mutex poisoned");
        inner.by_id.contains_key(&event_id)
    }
}
