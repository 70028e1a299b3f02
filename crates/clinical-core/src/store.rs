//! Event Store port.
//!
//! This is a domain-layer port — it defines what the event store must do,
//! not how. Infrastructure adapters (see `clinical-event-store`) implement
//! this trait. No projection logic is permitted in an implementation: the
//! store persists and retrieves events, nothing more.

use crate::error::ConcurrencyError;
use crate::event::DomainEvent;
use crate::values::AggregateId;

/// Port for event persistence.
///
/// Implementations must satisfy:
/// - Append-only: events are never modified or deleted.
/// - Immutable: a persisted event's content never changes except
///   `recorded_at`, which is set exactly once.
/// - Sequential per stream: `aggregate_version` is contiguous (1, 2, 3, ...)
///   per `aggregate_id`.
/// - No projection logic: the store does not interpret events.
pub trait EventStore {
    /// Append an event to its aggregate's stream.
    ///
    /// - Validates `aggregate_version == stream_version(aggregate_id) + 1`.
    /// - If `event_id` already exists, returns the existing stored event
    ///   unchanged (idempotent, not an error).
    /// - Otherwise sets `recorded_at` to the current time and returns the
    ///   persisted event.
    fn append(&self, event: DomainEvent) -> Result<DomainEvent, ConcurrencyError>;

    /// All events for an aggregate, ordered by `aggregate_version`. Empty if
    /// the aggregate has no events.
    fn read_stream(&self, aggregate_id: AggregateId) -> Vec<DomainEvent>;

    /// Events for an aggregate with `aggregate_version >= from_version`.
    fn read_stream_from(&self, aggregate_id: AggregateId, from_version: u64) -> Vec<DomainEvent>;

    /// All events across all streams, ordered by `recorded_at` then
    /// insertion order.
    fn read_all_events(&self) -> Vec<DomainEvent>;

    /// Highest `aggregate_version` in the stream; 0 if the stream does not exist.
    fn stream_version(&self, aggregate_id: AggregateId) -> u64;

    /// Whether an event with this identity has already been persisted.
    fn event_exists(&self, event_id: uuid::Uuid) -> bool;
}
