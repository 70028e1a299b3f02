//! Clinical record engine: event-sourced aggregates, projections, and an
//! offline-first sync layer built on top of the `clinical-core` domain
//! abstractions and the `clinical-event-store` in-memory adapter.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod sync;
