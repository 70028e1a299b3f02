//! Event store error types.
//!
//! This crate's only failure mode is the optimistic-locking conflict
//! already modeled by `clinical_core::ConcurrencyError`; this module exists
//! so a future persistent adapter (disk, network) has somewhere to add
//! `Database`/`Serialization` kinds without touching the port trait.

pub use clinical_core::ConcurrencyError as EventStoreError;
