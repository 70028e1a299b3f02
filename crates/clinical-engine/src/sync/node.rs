//! A sync-capable node: an independent device's local event store and
//! dispatcher.

use clinical_core::{DomainEvent, EventStore};
use std::collections::HashSet;
use uuid::Uuid;

use clinical_core::Dispatcher;

/// One device's local state: its event store and the dispatcher driving
/// its projections.
pub struct SyncNode<S: EventStore> {
    pub node_id: String,
    pub event_store: S,
    pub dispatcher: Dispatcher,
}

impl<S: EventStore> SyncNode<S> {
    #[must_use]
    pub fn new(node_id: impl Into<String>, event_store: S, dispatcher: Dispatcher) -> Self {
        Self {
            node_id: node_id.into(),
            event_store,
            dispatcher,
        }
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.event_store.read_all_events().len()
    }

    #[must_use]
    pub fn known_event_ids(&self) -> HashSet<Uuid> {
        self.event_store
            .read_all_events()
            .into_iter()
            .map(|e| e.event_id)
            .collect()
    }

    #[must_use]
    pub fn all_events(&self) -> Vec<DomainEvent> {
        self.event_store.read_all_events()
    }

    /// Receive an event from sync. Returns `true` if new, `false` if this
    /// node already had it. Duplicates are silently skipped — idempotent.
    pub fn receive_event(&self, event: DomainEvent) -> bool {
        if self.event_store.event_exists(event.event_id) {
            return false;
        }
        match self.event_store.append(event) {
            Ok(persisted) => {
                self.dispatcher.dispatch(&persisted);
                true
            }
            Err(_) => false,
        }
    }
}
