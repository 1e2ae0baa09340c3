//! Hub Stores
//!
//! The shared shopping list and the sticky-note board. Both collections
//! start empty, so neither store seeds anything.

use std::sync::Arc;

use rand::Rng;
use serde_json::{json, Map};
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{DomainResult, ShoppingItem, StickyNote, NOTE_COLORS};
use crate::remote::{collections, CollectionClient};

use super::mirror::Mirror;
use super::{delete_doc, patch_doc, write_doc};

/// Reactive mirror of the `shopping` collection
pub struct ShoppingStore {
    client: Arc<dyn CollectionClient>,
    mirror: Mirror<ShoppingItem>,
}

impl ShoppingStore {
    pub async fn connect(client: Arc<dyn CollectionClient>) -> DomainResult<Arc<Self>> {
        let mirror = Mirror::attach(&client, collections::SHOPPING).await?;
        Ok(Arc::new(Self { client, mirror }))
    }

    pub fn items(&self) -> Vec<ShoppingItem> {
        self.mirror.snapshot()
    }

    pub fn watch(&self) -> watch::Receiver<Vec<ShoppingItem>> {
        self.mirror.watch()
    }

    /// Add a line to the list, not yet bought
    pub async fn add_item(&self, name: &str) -> ShoppingItem {
        let item = ShoppingItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_bought: false,
        };
        write_doc(&self.client, collections::SHOPPING, &item.id, &item).await;
        item
    }

    /// Flip the bought flag of one line
    pub async fn toggle_item(&self, id: &str) {
        let Some(item) = self.mirror.get(id) else {
            log::warn!("toggle_item: unknown shopping item {}", id);
            return;
        };
        let mut patch = Map::new();
        patch.insert("isBought".into(), json!(!item.is_bought));
        patch_doc(&self.client, collections::SHOPPING, id, patch).await;
    }

    pub async fn remove_item(&self, id: &str) {
        delete_doc(&self.client, collections::SHOPPING, id).await;
    }
}

/// Reactive mirror of the `notes` collection
pub struct NoteStore {
    client: Arc<dyn CollectionClient>,
    mirror: Mirror<StickyNote>,
}

impl NoteStore {
    pub async fn connect(client: Arc<dyn CollectionClient>) -> DomainResult<Arc<Self>> {
        let mirror = Mirror::attach(&client, collections::NOTES).await?;
        Ok(Arc::new(Self { client, mirror }))
    }

    pub fn notes(&self) -> Vec<StickyNote> {
        self.mirror.snapshot()
    }

    pub fn watch(&self) -> watch::Receiver<Vec<StickyNote>> {
        self.mirror.watch()
    }

    /// Pin a note with a random palette color
    pub async fn add_note(&self, text: &str, author: &str) -> StickyNote {
        let color = NOTE_COLORS[rand::rng().random_range(0..NOTE_COLORS.len())];
        let note = StickyNote {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            color: color.to_string(),
            author: author.to_string(),
        };
        write_doc(&self.client, collections::NOTES, &note.id, &note).await;
        note
    }

    pub async fn remove_note(&self, id: &str) {
        delete_doc(&self.client, collections::NOTES, id).await;
    }
}
