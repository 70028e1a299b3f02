//! Query Gateway: dispatches read requests to registered projections.
//!
//! Unlike the command gateway, this reads projection state only — it never
//! touches the event store or an aggregate.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::application::error::AggregateError;
use crate::domain::projections::patient_summary::PatientSummaryProjection;
use clinical_core::Projection;

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub success: bool,
    pub data: Value,
    pub error: String,
}

impl QueryResult {
    fn ok(data: Value) -> Self {
        Self {
            success: true,
            data,
            error: String::new(),
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            error: message.into(),
        }
    }
}

type QueryMapperFn<'a> = dyn Fn(&Value) -> Result<Value, AggregateError> + 'a;

/// Dynamic query router. `'a` is the lifetime of whatever projections the
/// registered mappers borrow.
#[derive(Default)]
pub struct QueryGateway<'a> {
    mappers: HashMap<String, Box<QueryMapperFn<'a>>>,
}

impl<'a> QueryGateway<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `query_type` to a mapper closure that reads a projection's
    /// state and a `params` object, returning the response payload.
    pub fn register(
        &mut self,
        query_type: impl Into<String>,
        mapper: impl Fn(&Value) -> Result<Value, AggregateError> + 'a,
    ) {
        self.mappers.insert(query_type.into(), Box::new(mapper));
    }

    #[must_use]
    pub fn handle(&self, request: &Value) -> QueryResult {
        let Some(query_type) = request.get("query_type").and_then(Value::as_str) else {
            return QueryResult::err("Missing required field: query_type");
        };
        let Some(mapper) = self.mappers.get(query_type) else {
            return QueryResult::err(format!("Unknown query type: {query_type}"));
        };
        let params = request.get("params").cloned().unwrap_or(Value::Null);

        match mapper(&params) {
            Ok(data) => QueryResult::ok(data),
            Err(e) => QueryResult::err(e.to_string()),
        }
    }
}

/// Build the `"PatientSummary"` query mapper: flattens a
/// [`PatientSummaryProjection`]'s `HashMap<Uuid, _>` state into arrays of
/// objects with the map key folded in as an `"id"` field. Ignores `params`
/// — the projection has no filterable dimensions today.
pub fn patient_summary_mapper(
    projection: &PatientSummaryProjection,
) -> impl Fn(&Value) -> Result<Value, AggregateError> + '_ {
    move |_params| {
        let state = projection.state();

        let active_conditions: Vec<Value> = state
            .active_conditions
            .iter()
            .map(|(id, c)| {
                json!({
                    "id": id,
                    "condition": c.condition,
                    "icd_code": c.icd_code,
                    "patient_id": c.patient_id,
                })
            })
            .collect();

        let active_treatments: Vec<Value> = state
            .active_treatments
            .iter()
            .map(|(id, t)| {
                json!({
                    "id": id,
                    "treatment": t.treatment,
                    "diagnosis_id": t.diagnosis_id,
                    "patient_id": t.patient_id,
                })
            })
            .collect();

        let stopped_treatments: Vec<Value> = state
            .stopped_treatments
            .iter()
            .map(|(id, t)| {
                json!({
                    "id": id,
                    "reason": t.reason,
                })
            })
            .collect();

        let vitals: Vec<Value> = state
            .vitals
            .iter()
            .map(|v| {
                json!({
                    "recorded_at": v.recorded_at,
                    "readings": v.readings,
                    "patient_id": v.patient_id,
                    "encounter_id": v.encounter_id,
                })
            })
            .collect();

        Ok(json!({
            "active_conditions": active_conditions,
            "active_treatments": active_treatments,
            "stopped_treatments": stopped_treatments,
            "vitals": vitals,
        }))
    }
}
