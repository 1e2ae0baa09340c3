//! Chore Store
//!
//! Chore definitions, checklist sub-state, and the completion ledger.
//! Completion awards points through [`ProfileStore`]; the same-day
//! idempotence guard is the store's central correctness rule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Map};
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{
    now_time_string, today_local_string, Chore, ChoreDraft, ChoreRecord, ChoreUpdate,
    DomainResult, Recurrence,
};
use crate::remote::{collections, CollectionClient};

use super::mirror::Mirror;
use super::profile_store::ProfileStore;
use super::{delete_doc, patch_doc, write_doc};

/// Reactive mirror of the `chores` collection plus its operations
pub struct ChoreStore {
    client: Arc<dyn CollectionClient>,
    mirror: Mirror<Chore>,
    profiles: Arc<ProfileStore>,
    seeded: AtomicBool,
}

impl ChoreStore {
    /// Subscribe to the remote collection and start mirroring it
    pub async fn connect(
        client: Arc<dyn CollectionClient>,
        profiles: Arc<ProfileStore>,
    ) -> DomainResult<Arc<Self>> {
        let mirror = Mirror::attach(&client, collections::CHORES).await?;
        Ok(Arc::new(Self {
            client,
            mirror,
            profiles,
            seeded: AtomicBool::new(false),
        }))
    }

    /// Seed the starter chore set iff the collection is empty
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
        log::info!("seeding starter chores");
        for chore in Chore::seed_set() {
            write_doc(&self.client, collections::CHORES, &chore.id, &chore).await;
        }
    }

    /// Current mirror state
    pub fn chores(&self) -> Vec<Chore> {
        self.mirror.snapshot()
    }

    /// Look up one chore in the mirror
    pub fn get(&self, id: &str) -> Option<Chore> {
        self.mirror.get(id)
    }

    /// Change notifications for the presentation layer
    pub fn watch(&self) -> watch::Receiver<Vec<Chore>> {
        self.mirror.watch()
    }

    /// Create a chore with a fresh id and an empty history
    pub async fn add_chore(&self, draft: ChoreDraft) -> Chore {
        let chore = Chore::from_draft(Uuid::new_v4().to_string(), draft);
        write_doc(&self.client, collections::CHORES, &chore.id, &chore).await;
        chore
    }

    /// Patch definition fields; the completion history is never touched here
    pub async fn update_chore(&self, id: &str, update: ChoreUpdate) {
        let patch = update.into_patch();
        if patch.is_empty() {
            return;
        }
        patch_doc(&self.client, collections::CHORES, id, patch).await;
    }

    /// Remove a chore; nothing references chores, so no cascade
    pub async fn delete_chore(&self, id: &str) {
        delete_doc(&self.client, collections::CHORES, id).await;
    }

    /// True iff the chore's history has a record dated today (local date)
    pub fn is_completed_today(&self, id: &str) -> bool {
        self.mirror
            .get(id)
            .map(|chore| chore.completed_on(&today_local_string()))
            .unwrap_or(false)
    }

    /// Flip one checklist sub-item, independent of completion state
    pub async fn toggle_checklist_item(&self, chore_id: &str, item_id: &str) {
        let Some(mut chore) = self.mirror.get(chore_id) else {
            log::warn!("toggle_checklist_item: unknown chore {}", chore_id);
            return;
        };
        let Some(item) = chore.checklist.iter_mut().find(|i| i.id == item_id) else {
            log::warn!("toggle_checklist_item: unknown item {}/{}", chore_id, item_id);
            return;
        };
        item.is_done = !item.is_done;
        let mut patch = Map::new();
        patch.insert("checklist".into(), json!(chore.checklist));
        patch_doc(&self.client, collections::CHORES, chore_id, patch).await;
    }

    /// Complete a chore for a profile.
    ///
    /// A no-op returning `false` when the chore is unknown or already
    /// completed today. Otherwise awards the chore's points, resets the
    /// checklist for recurring chores, appends today's history record,
    /// and patches checklist and history in one write. The point award
    /// and the history write are independent remote writes; there is no
    /// cross-document transaction between them.
    ///
    /// Completing a chore with unchecked checklist items is allowed here;
    /// any "all steps first" rule is presentation policy.
    pub async fn complete(&self, id: &str, profile_id: &str) -> bool {
        if self.is_completed_today(id) {
            log::debug!("chore {} already completed today", id);
            return false;
        }
        let Some(mut chore) = self.mirror.get(id) else {
            log::warn!("complete: unknown chore {}", id);
            return false;
        };

        self.profiles
            .award_points(profile_id, chore.points as i32, true)
            .await;

        if chore.recurrence != Recurrence::None {
            for item in &mut chore.checklist {
                item.is_done = false;
            }
        }
        chore.history.push(ChoreRecord {
            date: today_local_string(),
            time: Some(now_time_string()),
            completed_by: profile_id.to_string(),
        });

        let mut patch = Map::new();
        patch.insert("checklist".into(), json!(chore.checklist));
        patch.insert("history".into(), json!(chore.history));
        patch_doc(&self.client, collections::CHORES, id, patch).await;
        true
    }
}
