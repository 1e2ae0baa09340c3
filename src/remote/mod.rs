//! Remote Boundary
//!
//! The opaque per-collection document store the stores mirror, plus an
//! in-memory implementation used by tests and embedded deployments.

mod memory;
mod traits;

pub use memory::MemoryCollectionClient;
pub use traits::{
    collections, ClientError, ClientResult, CollectionClient, Document, Snapshot, Subscription,
};
