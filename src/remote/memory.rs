//! In-Memory Collection Client
//!
//! Implements [`CollectionClient`] over process-local state, publishing a
//! fresh full snapshot on every mutation. Serves the same role the
//! `:memory:` database serves for a SQLite-backed repository: a real
//! backend for tests and single-process deployments.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{broadcast, Mutex};

use super::traits::{ClientError, ClientResult, CollectionClient, Document, Snapshot, Subscription};

const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

/// One collection's documents plus its snapshot channel
struct Topic {
    docs: BTreeMap<String, Value>,
    updates: broadcast::Sender<Snapshot>,
}

impl Topic {
    fn new() -> Self {
        let (updates, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            docs: BTreeMap::new(),
            updates,
        }
    }

    fn snapshot(&self) -> Snapshot {
        self.docs
            .iter()
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect()
    }

    /// Send the current snapshot to all subscribers (none is fine)
    fn publish(&self) {
        let _ = self.updates.send(self.snapshot());
    }
}

/// In-memory [`CollectionClient`]
///
/// Snapshots are published synchronously inside each mutation, so a test
/// that awaits the mirror after a write observes the echo deterministically.
pub struct MemoryCollectionClient {
    topics: Mutex<HashMap<String, Topic>>,
    fail_writes: AtomicBool,
}

impl MemoryCollectionClient {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail, to exercise error paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> ClientResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(ClientError::Backend("write failure injected".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryCollectionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionClient for MemoryCollectionClient {
    async fn subscribe(&self, collection: &str) -> ClientResult<Subscription> {
        let mut topics = self.topics.lock().await;
        let topic = topics
            .entry(collection.to_string())
            .or_insert_with(Topic::new);
        // Receiver is created under the lock, so no snapshot between
        // `initial` and the first received update can be missed.
        Ok(Subscription {
            initial: topic.snapshot(),
            updates: topic.updates.subscribe(),
        })
    }

    async fn put(&self, collection: &str, id: &str, doc: Value) -> ClientResult<()> {
        self.check_writable()?;
        let mut topics = self.topics.lock().await;
        let topic = topics
            .entry(collection.to_string())
            .or_insert_with(Topic::new);
        topic.docs.insert(id.to_string(), doc);
        topic.publish();
        Ok(())
    }

    async fn patch(&self, collection: &str, id: &str, partial: Value) -> ClientResult<()> {
        self.check_writable()?;
        let mut topics = self.topics.lock().await;
        let topic = topics
            .get_mut(collection)
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", collection, id)))?;
        let doc = topic
            .docs
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", collection, id)))?;
        let (Some(target), Some(fields)) = (doc.as_object_mut(), partial.as_object()) else {
            return Err(ClientError::Backend(
                "patch requires JSON object documents".to_string(),
            ));
        };
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
        topic.publish();
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> ClientResult<()> {
        self.check_writable()?;
        let mut topics = self.topics.lock().await;
        if let Some(topic) = topics.get_mut(collection) {
            if topic.docs.remove(id).is_some() {
                topic.publish();
            }
        }
        Ok(())
    }
}
