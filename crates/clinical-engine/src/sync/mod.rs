//! Offline-sync layer: `SyncNode` and `SyncEngine`, built purely on the
//! `EventStore` port and `Dispatcher` from `clinical-core`.

pub mod engine;
pub mod node;

pub use engine::{FullSyncResult, SyncEngine, SyncResult};
pub use node::SyncNode;
