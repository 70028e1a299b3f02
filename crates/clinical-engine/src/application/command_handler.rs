//! Generic command handler wiring an `Aggregate` to an `EventStore`.
//!
//! Every command handled here re-reads the target stream from the store,
//! rehydrates the aggregate, executes the command against that state, then
//! appends the resulting events with freshly assigned sequential versions.
//! Nothing is cached across commands: single-writer, read-then-act, no
//! in-process lock beyond the store's own.

use clinical_core::{
    Aggregate, AggregateId, ConcurrencyError, Dispatcher, DomainError, DomainEvent, EventStore,
};

/// Handles commands for one aggregate type against a store, publishing
/// whatever it persists.
pub struct CommandHandler<'a, A: Aggregate, S: EventStore> {
    store: &'a S,
    dispatcher: &'a Dispatcher,
    _aggregate: std::marker::PhantomData<A>,
}

impl<'a, A: Aggregate, S: EventStore> CommandHandler<'a, A, S> {
    #[must_use]
    pub fn new(store: &'a S, dispatcher: &'a Dispatcher) -> Self {
        Self {
            store,
            dispatcher,
            _aggregate: std::marker::PhantomData,
        }
    }

    /// Rehydrate `aggregate_id`'s stream, execute `command` against the
    /// resulting state, persist whatever events it produces, then dispatch
    /// them to any subscribers.
    ///
    /// Returns the persisted events (with `aggregate_version` and
    /// `recorded_at` filled in by the store) in emission order.
    pub fn handle(
        &self,
        aggregate_id: AggregateId,
        command: A::Command,
    ) -> Result<Vec<DomainEvent>, CommandHandlerError> {
        let history = self.store.read_stream(aggregate_id);
        let mut next_version = history.len() as u64;
        let state = A::rehydrate(history.iter());

        let new_events = A::execute(&state, command)?;

        let mut persisted = Vec::with_capacity(new_events.len());
        for event in new_events {
            next_version += 1;
            let versioned = event.with_aggregate_version(next_version);
            persisted.push(self.store.append(versioned)?);
        }
        for event in &persisted {
            self.dispatcher.dispatch(event);
        }
        Ok(persisted)
    }
}

#[derive(Debug)]
pub enum CommandHandlerError {
    Domain(DomainError),
    Concurrency(ConcurrencyError),
}

impl std::fmt::Display for CommandHandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Concurrency(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandHandlerError {}

impl From<DomainError> for CommandHandlerError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<ConcurrencyError> for CommandHandlerError {
    fn from(e: ConcurrencyError) -> Self {
        Self::Concurrency(e)
    }
}
