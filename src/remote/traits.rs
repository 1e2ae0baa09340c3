//! Remote Boundary - Core Trait
//!
//! Defines the abstract interface to the per-collection document store.
//! A subscription delivers the *full* document set of a collection, once
//! immediately and again after every remote mutation from any device.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

/// Well-known collection names
pub mod collections {
    pub const PROFILES: &str = "profiles";
    pub const CHORES: &str = "chores";
    pub const EVENTS: &str = "events";
    pub const REWARDS: &str = "rewards";
    pub const PURCHASES: &str = "purchases";
    pub const SHOPPING: &str = "shopping";
    pub const NOTES: &str = "notes";
}

/// One document of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Full state of one collection at a point in time
pub type Snapshot = Vec<Document>;

/// A live subscription to one collection
pub struct Subscription {
    /// State at subscribe time
    pub initial: Snapshot,
    /// Every snapshot published after `initial`
    pub updates: broadcast::Receiver<Snapshot>,
}

/// Common result type at the remote boundary
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the document store
#[derive(Debug, Clone)]
pub enum ClientError {
    NotFound(String),
    Backend(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ClientError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Per-collection document store operations
///
/// Object-safe so stores can share one boxed client injected at
/// construction time.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// Subscribe to a collection's snapshot stream
    async fn subscribe(&self, collection: &str) -> ClientResult<Subscription>;

    /// Create or replace a whole document
    async fn put(&self, collection: &str, id: &str, doc: Value) -> ClientResult<()>;

    /// Merge top-level fields into an existing document
    async fn patch(&self, collection: &str, id: &str, partial: Value) -> ClientResult<()>;

    /// Remove a document; removing an absent document is a no-op
    async fn delete(&self, collection: &str, id: &str) -> ClientResult<()>;
}
