//! In-process event dispatcher.
//!
//! Subscribers register interest in specific event types. When an event is
//! dispatched, every matching handler is invoked in registration order. A
//! handler that fails does not block or affect delivery to the others — the
//! failure is logged and swallowed, matching the publish side of a fire-
//! and-forget event bus.

use std::collections::HashMap;
use std::fmt;

use crate::event::DomainEvent;

/// Anything a handler can fail with; only used for logging, never propagated.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type Handler = Box<dyn Fn(&DomainEvent) -> Result<(), HandlerError>>;

/// In-process publish/subscribe over domain events, routed by `event_type`.
#[derive(Default)]
pub struct Dispatcher {
    subscriptions: HashMap<String, Vec<Handler>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "subscriptions",
                &self
                    .subscriptions
                    .iter()
                    .map(|(k, v)| (k.clone(), v.len()))
                    .collect::<HashMap<_, _>>(),
            )
            .finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event type. Registration order is
    /// preserved; a handler subscribed to multiple types is stored once per
    /// type.
    pub fn subscribe(
        &mut self,
        event_type: impl Into<String>,
        handler: impl Fn(&DomainEvent) -> Result<(), HandlerError> + 'static,
    ) {
        self.subscriptions
            .entry(event_type.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch a single event to all matching subscribers. Handler failures
    /// are logged and isolated — they do not propagate and do not prevent
    /// other handlers from receiving the event.
    pub fn dispatch(&self, event: &DomainEvent) {
        let Some(handlers) = self.subscriptions.get(&event.event_type) else {
            return;
        };
        for (index, handler) in handlers.iter().enumerate() {
            if let Err(err) = handler(event) {
                tracing::warn!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    handler_index = index,
                    error = %err,
                    "event handler failed, continuing dispatch to remaining subscribers"
                );
            }
        }
    }

    /// Dispatch a batch of events with deterministic ordering: sort by
    /// `(aggregate_id, aggregate_version)` first, so that within each
    /// aggregate stream events are delivered in version order. Critical
    /// for projection correctness after offline sync, which delivers
    /// events in bulk and out of creation order.
    pub fn dispatch_batch(&self, events: &[DomainEvent]) {
        let mut ordered: Vec<&DomainEvent> = events.iter().collect();
        ordered.sort_by_key(|e| (e.aggregate_id, e.aggregate_version));
        for event in ordered {
            self.dispatch(event);
        }
    }
}
