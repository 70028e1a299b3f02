//! Event store re-exported from the `clinical-event-store` crate.
//!
//! This module exists so call sites within `clinical-engine` import
//! infrastructure types from `crate::infrastructure` rather than reaching
//! across to the adapter crate directly.

pub use clinical_event_store::{EventStoreError, InMemoryEventStore};
