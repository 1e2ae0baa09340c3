//! Collection Mirror
//!
//! The local reactive copy of one remote collection. A background task
//! forwards every subscription snapshot into a `watch` channel; reads are
//! synchronous over the latest value. The mirror is never mutated locally.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

use crate::domain::{DomainError, DomainResult, Entity};
use crate::remote::{CollectionClient, Snapshot};

/// Read-only reactive view of one collection
pub(crate) struct Mirror<T> {
    rx: watch::Receiver<Vec<T>>,
}

impl<T> Mirror<T>
where
    T: Entity + DeserializeOwned + Send + 'static,
{
    /// Subscribe to `collection` and keep its decoded state current
    pub async fn attach(
        client: &Arc<dyn CollectionClient>,
        collection: &'static str,
    ) -> DomainResult<Mirror<T>> {
        let sub = client
            .subscribe(collection)
            .await
            .map_err(|e| DomainError::Internal(format!("subscribe {}: {}", collection, e)))?;

        let (tx, rx) = watch::channel(decode::<T>(collection, &sub.initial));
        let mut updates = sub.updates;
        tokio::spawn(async move {
            loop {
                match updates.recv().await {
                    Ok(snapshot) => {
                        if tx.send(decode::<T>(collection, &snapshot)).is_err() {
                            // Mirror dropped, nobody is reading anymore
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        // Every message is a full snapshot, skipping
                        // intermediate ones loses nothing
                        log::warn!("{} mirror lagged by {} snapshots", collection, n);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(Mirror { rx })
    }

    /// Clone of the current collection state
    pub fn snapshot(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Look up one entity by document id
    pub fn get(&self, id: &str) -> Option<T> {
        self.rx.borrow().iter().find(|e| e.id() == id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }

    /// Receiver for consumers that want change notifications
    pub fn watch(&self) -> watch::Receiver<Vec<T>> {
        self.rx.clone()
    }
}

/// Decode a snapshot, skipping documents that do not parse at all.
/// Missing optional fields are defaulted by serde, never rejected.
fn decode<T: DeserializeOwned>(collection: &str, snapshot: &Snapshot) -> Vec<T> {
    snapshot
        .iter()
        .filter_map(|doc| match serde_json::from_value(doc.data.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                log::warn!("skipping malformed {} document {}: {}", collection, doc.id, e);
                None
            }
        })
        .collect()
}
