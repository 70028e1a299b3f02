//! Domain layer: aggregates, commands, and projections.
//!
//! Nothing under this module touches an event store or the outside
//! world — every type here is plain data and pure functions, per
//! [`clinical_core::Aggregate`] and [`clinical_core::Projection`].

pub mod diagnosis;
pub mod encounter;
pub mod observation;
pub mod projections;
