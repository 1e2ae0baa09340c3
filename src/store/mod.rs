//! Store Layer
//!
//! Reactive per-collection stores. Each store mirrors one remote
//! collection into local state and applies mutations remotely; the mirror
//! changes only when the subscription echoes the write back. Remote
//! failures are logged and swallowed here so no error reaches the
//! presentation layer.

mod chore_store;
mod event_store;
mod hub_store;
mod mirror;
mod profile_store;
mod shop_store;

#[cfg(test)]
mod tests;

pub use chore_store::ChoreStore;
pub use event_store::EventStore;
pub use hub_store::{NoteStore, ShoppingStore};
pub use profile_store::ProfileStore;
pub use shop_store::ShopStore;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::remote::CollectionClient;

/// Create/replace a document, logging (not propagating) any failure
pub(crate) async fn write_doc<T: Serialize>(
    client: &Arc<dyn CollectionClient>,
    collection: &str,
    id: &str,
    entity: &T,
) {
    match serde_json::to_value(entity) {
        Ok(doc) => {
            if let Err(e) = client.put(collection, id, doc).await {
                log::error!("failed to write {}/{}: {}", collection, id, e);
            }
        }
        Err(e) => log::error!("failed to encode {}/{}: {}", collection, id, e),
    }
}

/// Merge fields into a document, logging (not propagating) any failure
pub(crate) async fn patch_doc(
    client: &Arc<dyn CollectionClient>,
    collection: &str,
    id: &str,
    partial: Map<String, Value>,
) {
    if let Err(e) = client.patch(collection, id, Value::Object(partial)).await {
        log::error!("failed to patch {}/{}: {}", collection, id, e);
    }
}

/// Delete a document, logging (not propagating) any failure
pub(crate) async fn delete_doc(client: &Arc<dyn CollectionClient>, collection: &str, id: &str) {
    if let Err(e) = client.delete(collection, id).await {
        log::error!("failed to delete {}/{}: {}", collection, id, e);
    }
}
