//! Domain event value objects and the clinical event envelope.
//!
//! Events are immutable records of clinical facts. Every event carries the
//! 17 mandatory metadata fields plus an opaque, per-`event_type` payload
//! that the event store never interprets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::values::AggregateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Online,
    Offline,
}

/// An immutable clinical event: 17-field metadata envelope + opaque payload.
///
/// `aggregate_version == 0` and `recorded_at.is_none()` together mark an
/// event that an aggregate has just produced but that has not yet been
/// persisted — the command handler is responsible for overwriting the
/// version and the event store for setting `recorded_at`, both exactly
/// once, before any caller observes the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    // Identity fields
    pub event_id: Uuid,
    pub event_type: String,
    pub schema_version: u32,

    // Aggregate fields
    pub aggregate_id: AggregateId,
    pub aggregate_type: String,
    pub aggregate_version: u64,

    // Temporal fields
    pub occurred_at: DateTime<Utc>,

    // Actor fields
    pub performed_by: Uuid,
    pub performer_role: String,

    // Organizational context fields
    pub organization_id: Uuid,
    pub facility_id: Uuid,

    // Device & sync fields
    pub device_id: String,
    pub connection_status: ConnectionStatus,

    // Traceability fields
    pub correlation_id: Uuid,

    // Fields set after construction
    pub recorded_at: Option<DateTime<Utc>>,
    pub causation_id: Option<Uuid>,
    pub visibility: Vec<String>,

    pub payload: Map<String, Value>,
}

/// Context an aggregate needs to construct an event from a command, shared
/// by every command in this system regardless of aggregate type.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub occurred_at: DateTime<Utc>,
    pub performed_by: Uuid,
    pub performer_role: String,
    pub organization_id: Uuid,
    pub facility_id: Uuid,
    pub device_id: String,
    pub connection_status: ConnectionStatus,
    pub correlation_id: Uuid,
}

impl DomainEvent {
    /// Construct a new, not-yet-persisted event: `aggregate_version == 0`,
    /// `recorded_at == None`. The command handler overwrites the version
    /// before calling `EventStore::append`.
    #[must_use]
    pub fn pending(
        event_type: impl Into<String>,
        aggregate_id: AggregateId,
        aggregate_type: impl Into<String>,
        payload: Map<String, Value>,
        ctx: &CommandContext,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.into(),
            schema_version: 1,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            aggregate_version: 0,
            occurred_at: ctx.occurred_at,
            performed_by: ctx.performed_by,
            performer_role: ctx.performer_role.clone(),
            organization_id: ctx.organization_id,
            facility_id: ctx.facility_id,
            device_id: ctx.device_id.clone(),
            connection_status: ctx.connection_status,
            correlation_id: ctx.correlation_id,
            recorded_at: None,
            causation_id: None,
            visibility: vec!["clinical_staff".to_string()],
            payload,
        }
    }

    /// Return a copy of this event with `aggregate_version` overwritten.
    /// Used by the command handler once it knows the stream's next version.
    #[must_use]
    pub fn with_aggregate_version(&self, version: u64) -> Self {
        Self {
            aggregate_version: version,
            ..self.clone()
        }
    }

    /// Return a copy of this event with `recorded_at` set. Used by the
    /// event store at persist time; must only be called once per event.
    #[must_use]
    pub fn with_recorded_at(&self, timestamp: DateTime<Utc>) -> Self {
        Self {
            recorded_at: Some(timestamp),
            ..self.clone()
        }
    }
}
