//! Sync Engine — local simulation of node-to-node event synchronization.
//!
//! No networking layer; sync runs via direct calls between `SyncNode`s,
//! each wrapping an event store and a dispatcher. Idempotent: syncing
//! twice transfers nothing the second time.

use std::collections::HashSet;

use clinical_core::{DomainEvent, EventStore};

use super::node::SyncNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    pub transferred_count: usize,
    pub duplicate_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullSyncResult {
    pub a_to_b_transferred: usize,
    pub b_to_a_transferred: usize,
    pub a_to_b_duplicates: usize,
    pub b_to_a_duplicates: usize,
}

#[derive(Debug, Default)]
pub struct SyncEngine;

impl SyncEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Events that `source` has but `target` lacks, in `source`'s recorded
    /// order.
    #[must_use]
    pub fn detect_missing<S: EventStore, T: EventStore>(
        &self,
        source: &SyncNode<S>,
        target: &SyncNode<T>,
    ) -> Vec<DomainEvent> {
        let target_ids: HashSet<_> = target.known_event_ids();
        source
            .all_events()
            .into_iter()
            .filter(|e| !target_ids.contains(&e.event_id))
            .collect()
    }

    /// One-directional sync: `source` → `target`.
    pub fn sync<S: EventStore, T: EventStore>(
        &self,
        source: &SyncNode<S>,
        target: &SyncNode<T>,
    ) -> SyncResult {
        let missing = self.detect_missing(source, target);
        let missing_ids: HashSet<_> = missing.iter().map(|e| e.event_id).collect();

        let mut transferred = 0;
        let mut duplicates = 0;
        for event in missing {
            if target.receive_event(event) {
                transferred += 1;
            } else {
                duplicates += 1;
            }
        }

        let source_ids = source.known_event_ids();
        let target_ids = target.known_event_ids();
        let already_had = source_ids
            .intersection(&(&target_ids - &missing_ids))
            .count();
        duplicates += already_had;

        tracing::debug!(
            source = %source.node_id,
            target = %target.node_id,
            transferred,
            duplicates,
            "sync complete"
        );

        SyncResult {
            transferred_count: transferred,
            duplicate_count: duplicates,
        }
    }

    /// Bidirectional sync: A → B, then B → A.
    pub fn full_sync<A: EventStore, B: EventStore>(
        &self,
        node_a: &SyncNode<A>,
        node_b: &SyncNode<B>,
    ) -> FullSyncResult {
        let a_to_b = self.sync(node_a, node_b);
        let b_to_a = self.sync(node_b, node_a);

        FullSyncResult {
            a_to_b_transferred: a_to_b.transferred_count,
            b_to_a_transferred: b_to_a.transferred_count,
            a_to_b_duplicates: a_to_b.duplicate_count,
            b_to_a_duplicates: b_to_a.duplicate_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clinical_core::{AggregateId, CommandContext, ConnectionStatus, Dispatcher};
    use clinical_event_store::InMemoryEventStore;
    use serde_json::{json, Map};
    use uuid::Uuid;

    fn ctx(device: &str) -> CommandContext {
        CommandContext {
            occurred_at: Utc::now(),
            performed_by: Uuid::new_v4(),
            performer_role: "nurse".to_string(),
            organization_id: Uuid::new_v4(),
            facility_id: Uuid::new_v4(),
            device_id: device.to_string(),
            connection_status: ConnectionStatus::Offline,
            correlation_id: Uuid::new_v4(),
        }
    }

    fn node(name: &str) -> SyncNode<InMemoryEventStore> {
        SyncNode::new(name, InMemoryEventStore::new(), Dispatcher::new())
    }

    fn vitals_event(device: &str) -> DomainEvent {
        let payload = json!({"systolic": 145, "diastolic": 92})
            .as_object()
            .cloned()
            .unwrap_or_default();
        DomainEvent::pending(
            "clinical.observation.VitalSignsRecorded",
            AggregateId::new(),
            "Observation",
            payload,
            &ctx(device),
        )
        .with_aggregate_version(1)
    }

    fn diagnosis_event(device: &str) -> DomainEvent {
        DomainEvent::pending(
            "clinical.judgment.DiagnosisConfirmed",
            AggregateId::new(),
            "Diagnosis",
            Map::new(),
            &ctx(device),
        )
        .with_aggregate_version(1)
    }

    #[test]
    fn sync_transfers_missing_events_and_dispatches_them() {
        let a = node("nurse-tablet");
        let b = node("doctor-laptop");
        a.event_store.append(vitals_event("nurse-tablet")).expect("append");

        let engine = SyncEngine::new();
        let result = engine.sync(&a, &b);

        assert_eq!(result.transferred_count, 1);
        assert_eq!(result.duplicate_count, 0);
        assert_eq!(b.event_count(), 1);
    }

    #[test]
    fn repeated_sync_transfers_nothing() {
        let a = node("nurse-tablet");
        let b = node("doctor-laptop");
        a.event_store.append(vitals_event("nurse-tablet")).expect("append");

        let engine = SyncEngine::new();
        engine.sync(&a, &b);
        let second = engine.sync(&a, &b);

        assert_eq!(second.transferred_count, 0);
    }

    #[test]
    fn full_sync_converges_both_nodes_to_the_same_event_set() {
        let a = node("nurse-tablet");
        let b = node("doctor-laptop");
        a.event_store.append(vitals_event("nurse-tablet")).expect("append");
        b.event_store
            .append(diagnosis_event("doctor-laptop"))
            .expect("append");

        let engine = SyncEngine::new();
        let result = engine.full_sync(&a, &b);

        assert_eq!(result.a_to_b_transferred, 1);
        assert_eq!(result.b_to_a_transferred, 1);
        assert_eq!(a.event_count(), 2);
        assert_eq!(b.event_count(), 2);
        assert_eq!(a.known_event_ids(), b.known_event_ids());

        let second = engine.full_sync(&a, &b);
        assert_eq!(second.a_to_b_transferred, 0);
        assert_eq!(second.b_to_a_transferred, 0);
    }
}
