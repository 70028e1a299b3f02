//! The `Projection` trait.
//!
//! A projection is a derived, rebuildable view of events: it folds a
//! subscribed subset of event types into an in-memory state, tracking which
//! event identities it has already processed so repeated delivery (e.g.
//! after sync) is a no-op.

use std::collections::HashSet;

use uuid::Uuid;

use crate::event::DomainEvent;

/// A pure fold over a subscribed subset of the event stream.
pub trait Projection: Default {
    type State: Default + Clone;

    /// Event types this projection consumes. Events of other types are
    /// silently ignored by `handle`.
    fn subscribed_event_types(&self) -> &[&'static str];

    /// Pure fold: `(state, event) -> new_state`. Deterministic,
    /// side-effect-free, reads only its arguments.
    fn apply(&self, state: Self::State, event: &DomainEvent) -> Self::State;

    /// Current projection state. Read-only access for queries.
    fn state(&self) -> &Self::State;

    /// Process a single event. Skips event types this projection does not
    /// subscribe to and events already processed (idempotent by `event_id`).
    fn handle(&mut self, event: &DomainEvent);

    /// Rebuild this projection's state entirely from an ordered history.
    /// Clears existing state and processed-event tracking first.
    fn rebuild_from<'a>(&mut self, events: impl IntoIterator<Item = &'a DomainEvent>);
}

/// Shared bookkeeping a concrete `Projection` implementation composes: the
/// folded state plus the set of already-processed event identities.
#[derive(Debug, Clone, Default)]
pub struct ProjectionCore<S: Default + Clone> {
    pub state: S,
    processed_event_ids: HashSet<Uuid>,
}

impl<S: Default + Clone> ProjectionCore<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = S::default();
        self.processed_event_ids.clear();
    }

    /// Returns `true` if this event was newly marked processed (i.e. the
    /// caller should fold it), `false` if it was already seen.
    pub fn mark_processed(&mut self, event_id: Uuid) -> bool {
        self.processed_event_ids.insert(event_id)
    }
}
