//! The `Aggregate` trait and `AggregateRoot` wrapper.
//!
//! An aggregate is a transactional clinical boundary: it maintains state
//! derived exclusively from its own event stream, accepts commands, and
//! produces events (or rejects the command with a `DomainError`). It has no
//! knowledge of infrastructure, projections, or other aggregates — cross
//! aggregate preconditions belong to a specialized command handler, not to
//! the aggregate itself.

use crate::error::DomainError;
use crate::event::DomainEvent;

/// A pure, deterministic state machine over a single event-sourced stream.
pub trait Aggregate: Default {
    const NAME: &'static str;

    type State: Default + Clone;
    type Command;

    /// Pure fold: apply one event to produce new state. Used during
    /// rehydration. Must be total over every event type the aggregate
    /// knows and leave `state` unchanged for event types it doesn't.
    fn apply_event(state: Self::State, event: &DomainEvent) -> Self::State;

    /// Decide whether to accept a command against the current state.
    /// Reads only `state` and `command`; emits a not-yet-persisted
    /// sequence of events (see `DomainEvent::pending`) or rejects with a
    /// `DomainError`.
    fn execute(state: &Self::State, command: Self::Command) -> Result<Vec<DomainEvent>, DomainError>;

    /// Rebuild aggregate state by replaying events through `apply_event`.
    fn rehydrate<'a>(events: impl IntoIterator<Item = &'a DomainEvent>) -> Self::State {
        events
            .into_iter()
            .fold(Self::State::default(), Self::apply_event)
    }
}

/// Tracks an aggregate's derived state alongside its stream version.
///
/// `AggregateRoot` is a convenience for callers that want to hold state and
/// version together (e.g. tests); the command handler itself reads the
/// stream fresh on every command and does not keep an `AggregateRoot`
/// between calls.
#[derive(Debug, Clone)]
pub struct AggregateRoot<A: Aggregate> {
    state: A::State,
    version: u64,
}

impl<A: Aggregate> AggregateRoot<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: A::State::default(),
            version: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &A::State {
        &self.state
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Fold one already-persisted event into this root, advancing its version.
    pub fn apply(&mut self, event: &DomainEvent) {
        self.state = A::apply_event(std::mem::take(&mut self.state), event);
        self.version = event.aggregate_version;
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a DomainEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn handle(&self, command: A::Command) -> Result<Vec<DomainEvent>, DomainError> {
        A::execute(&self.state, command)
    }

    #[must_use]
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a DomainEvent>) -> Self {
        let mut root = Self::new();
        root.apply_all(events);
        root
    }
}

impl<A: Aggregate> Default for AggregateRoot<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CommandContext, ConnectionStatus};
    use crate::values::AggregateId;
    use chrono::Utc;
    use serde_json::Map;
    use uuid::Uuid;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct TestState {
        count: u32,
    }

    #[derive(Debug, Default)]
    struct TestAggregate;

    enum TestCommand {
        Increment,
        FailIfNonzero,
    }

    impl Aggregate for TestAggregate {
        const NAME: &'static str = "Test";
        type State = TestState;
        type Command = TestCommand;

        fn apply_event(mut state: Self::State, event: &DomainEvent) -> Self::State {
            if event.event_type == "test.Incremented" {
                state.count += 1;
            }
            state
        }

        fn execute(
            state: &Self::State,
            command: Self::Command,
        ) -> Result<Vec<DomainEvent>, DomainError> {
            match command {
                TestCommand::Increment => {
                    let ctx = CommandContext {
                        occurred_at: Utc::now(),
                        performed_by: Uuid::new_v4(),
                        performer_role: "tester".to_string(),
                        organization_id: Uuid::new_v4(),
                        facility_id: Uuid::new_v4(),
                        device_id: "dev".to_string(),
                        connection_status: ConnectionStatus::Online,
                        correlation_id: Uuid::new_v4(),
                    };
                    Ok(vec![DomainEvent::pending(
                        "test.Incremented",
                        AggregateId::new(),
                        Self::NAME,
                        Map::new(),
                        &ctx,
                    )])
                }
                TestCommand::FailIfNonzero => {
                    if state.count != 0 {
                        return Err(DomainError::invariant_violated("count is nonzero"));
                    }
                    Ok(vec![])
                }
            }
        }
    }

    #[test]
    fn rehydrate_folds_events_in_order() {
        let agg_id = AggregateId::new();
        let ctx = CommandContext {
            occurred_at: Utc::now(),
            performed_by: Uuid::new_v4(),
            performer_role: "tester".to_string(),
            organization_id: Uuid::new_v4(),
            facility_id: Uuid::new_v4(),
            device_id: "dev".to_string(),
            connection_status: ConnectionStatus::Online,
            correlation_id: Uuid::new_v4(),
        };
        let events: Vec<DomainEvent> = (1..=3)
            .map(|v| {
                DomainEvent::pending("test.Incremented", agg_id, "Test", Map::new(), &ctx)
                    .with_aggregate_version(v)
            })
            .collect();
        let state = TestAggregate::rehydrate(events.iter());
        assert_eq!(state.count, 3);
    }

    #[test]
    fn aggregate_root_tracks_version_and_state() {
        let mut root = AggregateRoot::<TestAggregate>::new();
        assert_eq!(root.version(), 0);

        let events = root.handle(TestCommand::Increment).expect("accepted");
        let persisted: Vec<DomainEvent> = events
            .into_iter()
            .enumerate()
            .map(|(i, e)| e.with_aggregate_version(i as u64 + 1))
            .collect();
        root.apply_all(persisted.iter());

        assert_eq!(root.version(), 1);
        assert_eq!(root.state().count, 1);
    }

    #[test]
    fn execute_rejects_without_mutating_state() {
        let mut root = AggregateRoot::<TestAggregate>::new();
        let events = root.handle(TestCommand::Increment).expect("accepted");
        root.apply_all(
            events
                .into_iter()
                .map(|e| e.with_aggregate_version(1))
                .collect::<Vec<_>>()
                .iter(),
        );

        let result = root.handle(TestCommand::FailIfNonzero);
        assert!(result.is_err());
        assert_eq!(root.state().count, 1);
    }
}
