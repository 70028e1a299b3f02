//! Command Gateway: translates untyped requests into typed commands and
//! never raises — every outcome, success or failure, is a `GatewayResult`.
//!
//! Validation runs in a fixed order (envelope shape, registration lookup,
//! required fields, UUID fields) before a registered mapper builds the
//! typed command and routes it to its handler.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use clinical_core::{CommandContext, ConnectionStatus, DomainEvent, EnvelopeError};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::application::error::AggregateError;

/// Result of handling one command request. Never an `Err` at the call site
/// — failures are reported through `success`/`error`.
#[derive(Debug, Clone)]
pub struct GatewayResult {
    pub success: bool,
    pub events: Vec<DomainEvent>,
    pub error: String,
}

impl GatewayResult {
    fn ok(events: Vec<DomainEvent>) -> Self {
        Self {
            success: true,
            events,
            error: String::new(),
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            events: Vec::new(),
            error: message.into(),
        }
    }
}

type CommandHandlerFn<'a> =
    dyn Fn(Uuid, &Map<String, Value>, CommandContext) -> Result<Vec<DomainEvent>, AggregateError> + 'a;

struct CommandRegistration<'a> {
    aggregate_id_field: &'static str,
    required_fields: Vec<&'static str>,
    uuid_fields: Vec<&'static str>,
    handler: Box<CommandHandlerFn<'a>>,
}

/// Dynamic command router. `'a` is the lifetime of whatever event stores
/// and per-aggregate handlers the registered closures capture.
#[derive(Default)]
pub struct CommandGateway<'a> {
    registrations: HashMap<String, CommandRegistration<'a>>,
}

impl<'a> CommandGateway<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `command_type` to a handler.
    ///
    /// `required_fields` and `uuid_fields` should include the 8 common
    /// context fields (`occurred_at`, `performed_by`, ...) in addition to
    /// whatever payload fields the command itself needs — every command
    /// envelope carries them.
    pub fn register(
        &mut self,
        command_type: impl Into<String>,
        aggregate_id_field: &'static str,
        required_fields: Vec<&'static str>,
        uuid_fields: Vec<&'static str>,
        handler: impl Fn(Uuid, &Map<String, Value>, CommandContext) -> Result<Vec<DomainEvent>, AggregateError>
            + 'a,
    ) {
        self.registrations.insert(
            command_type.into(),
            CommandRegistration {
                aggregate_id_field,
                required_fields,
                uuid_fields,
                handler: Box::new(handler),
            },
        );
    }

    #[must_use]
    pub fn handle(&self, request: &Value) -> GatewayResult {
        match self.handle_inner(request) {
            Ok(events) => GatewayResult::ok(events),
            Err(message) => GatewayResult::err(message),
        }
    }

    fn handle_inner(&self, request: &Value) -> Result<Vec<DomainEvent>, String> {
        let command_type = request
            .get("command_type")
            .and_then(Value::as_str)
            .ok_or_else(|| EnvelopeError::missing_field("command_type").to_string())?;

        let payload = request
            .get("payload")
            .and_then(Value::as_object)
            .ok_or_else(|| EnvelopeError::missing_field("payload").to_string())?;

        let registration = self
            .registrations
            .get(command_type)
            .ok_or_else(|| EnvelopeError::unknown_type(command_type).to_string())?;

        for field in &registration.required_fields {
            if !payload.contains_key(*field) {
                return Err(format!("Missing required field in payload: {field}"));
            }
        }

        for field in &registration.uuid_fields {
            if let Some(value) = payload.get(*field) {
                if value.as_str().and_then(|s| s.parse::<Uuid>().ok()).is_none() {
                    return Err(EnvelopeError::invalid_uuid(*field).to_string());
                }
            }
        }

        let aggregate_id = payload
            .get(registration.aggregate_id_field)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Uuid>().ok())
            .ok_or_else(|| EnvelopeError::invalid_uuid(registration.aggregate_id_field).to_string())?;

        let ctx = extract_context(payload).map_err(|e| e.to_string())?;

        (registration.handler)(aggregate_id, payload, ctx).map_err(|e| e.to_string())
    }
}

/// Pull the 8 common context fields out of a command payload.
fn extract_context(payload: &Map<String, Value>) -> Result<CommandContext, EnvelopeError> {
    let str_field = |field: &'static str| -> Result<String, EnvelopeError> {
        payload
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| EnvelopeError::missing_field(field))
    };
    let uuid_field = |field: &'static str| -> Result<Uuid, EnvelopeError> {
        str_field(field)?
            .parse()
            .map_err(|_| EnvelopeError::invalid_uuid(field))
    };

    let occurred_at: DateTime<Utc> = str_field("occurred_at")?
        .parse()
        .map_err(|_| EnvelopeError::invalid_shape("occurred_at is not a valid ISO 8601 instant"))?;
    let connection_status = match str_field("connection_status")?.as_str() {
        "online" => ConnectionStatus::Online,
        "offline" => ConnectionStatus::Offline,
        other => {
            return Err(EnvelopeError::invalid_shape(format!(
                "connection_status must be \"online\" or \"offline\", got \"{other}\""
            )))
        }
    };

    Ok(CommandContext {
        occurred_at,
        performed_by: uuid_field("performed_by")?,
        performer_role: str_field("performer_role")?,
        organization_id: uuid_field("organization_id")?,
        facility_id: uuid_field("facility_id")?,
        device_id: str_field("device_id")?,
        connection_status,
        correlation_id: uuid_field("correlation_id")?,
    })
}
