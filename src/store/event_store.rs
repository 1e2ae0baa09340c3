//! Event Store
//!
//! Calendar entries; independent of every other store. Date ordering is
//! applied on read, the collection itself is unordered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{DomainResult, EventDraft, EventUpdate, FamilyEvent};
use crate::remote::{collections, CollectionClient};

use super::mirror::Mirror;
use super::{delete_doc, patch_doc, write_doc};

/// Reactive mirror of the `events` collection plus its operations
pub struct EventStore {
    client: Arc<dyn CollectionClient>,
    mirror: Mirror<FamilyEvent>,
    seeded: AtomicBool,
}

impl EventStore {
    /// Subscribe to the remote collection and start mirroring it
    pub async fn connect(client: Arc<dyn CollectionClient>) -> DomainResult<Arc<Self>> {
        let mirror = Mirror::attach(&client, collections::EVENTS).await?;
        Ok(Arc::new(Self {
            client,
            mirror,
            seeded: AtomicBool::new(false),
        }))
    }

    /// Seed the example events iff the collection is empty
    pub async fn bootstrap(&self) {
        if !self.mirror.is_empty() {
            return;
        }
        if self
            .seeded
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        log::info!("seeding example events");
        for event in FamilyEvent::seed_set() {
            write_doc(&self.client, collections::EVENTS, &event.id, &event).await;
        }
    }

    /// Current mirror state, unordered
    pub fn events(&self) -> Vec<FamilyEvent> {
        self.mirror.snapshot()
    }

    /// Mirror state ordered by date ascending, for display
    pub fn upcoming(&self) -> Vec<FamilyEvent> {
        let mut events = self.mirror.snapshot();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events
    }

    /// Look up one event in the mirror
    pub fn get(&self, id: &str) -> Option<FamilyEvent> {
        self.mirror.get(id)
    }

    /// Change notifications for the presentation layer
    pub fn watch(&self) -> watch::Receiver<Vec<FamilyEvent>> {
        self.mirror.watch()
    }

    /// Create an event with a fresh id
    pub async fn add_event(&self, draft: EventDraft) -> FamilyEvent {
        let event = FamilyEvent::from_draft(Uuid::new_v4().to_string(), draft);
        write_doc(&self.client, collections::EVENTS, &event.id, &event).await;
        event
    }

    /// Patch event fields
    pub async fn update_event(&self, id: &str, update: EventUpdate) {
        let patch = update.into_patch();
        if patch.is_empty() {
            return;
        }
        patch_doc(&self.client, collections::EVENTS, id, patch).await;
    }

    /// Remove an event
    pub async fn delete_event(&self, id: &str) {
        delete_doc(&self.client, collections::EVENTS, id).await;
    }
}
