//! Profile Store
//!
//! Sole owner of point/xp mutation logic. ChoreStore and ShopStore call
//! into this store instead of touching profile documents themselves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Map};
use tokio::sync::watch;

use crate::domain::{DomainResult, Profile};
use crate::remote::{collections, CollectionClient};

use super::mirror::Mirror;
use super::{patch_doc, write_doc};

/// Reactive mirror of the `profiles` collection plus the award operations
pub struct ProfileStore {
    client: Arc<dyn CollectionClient>,
    mirror: Mirror<Profile>,
    seeded: AtomicBool,
}

impl ProfileStore {
    /// Subscribe to the remote collection and start mirroring it
    pub async fn connect(client: Arc<dyn CollectionClient>) -> DomainResult<Arc<Self>> {
        let mirror = Mirror::attach(&client, collections::PROFILES).await?;
        Ok(Arc::new(Self {
            client,
            mirror,
            seeded: AtomicBool::new(false),
        }))
    }

    /// Seed the default profile set iff the collection is empty.
    ///
    /// The compare-and-set guard keeps repeated empty-snapshot
    /// observations from seeding twice.
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
        log::info!("seeding default profiles");
        for profile in Profile::seed_set() {
            write_doc(&self.client, collections::PROFILES, &profile.id, &profile).await;
        }
    }

    /// Current mirror state
    pub fn profiles(&self) -> Vec<Profile> {
        self.mirror.snapshot()
    }

    /// Look up one profile in the mirror
    pub fn get(&self, id: &str) -> Option<Profile> {
        self.mirror.get(id)
    }

    /// Change notifications for the presentation layer
    pub fn watch(&self) -> watch::Receiver<Vec<Profile>> {
        self.mirror.watch()
    }

    /// Award (or debit, negative `amount`) points to a profile.
    ///
    /// Reads the current mirror value, clamps the balance at zero, grows
    /// xp only for positive xp-affecting amounts, rederives level and
    /// title, and patches the four fields back. The mirror itself updates
    /// once the subscription echoes the write; an unknown profile or a
    /// failed write is a logged no-op.
    pub async fn award_points(&self, profile_id: &str, amount: i32, affects_xp: bool) {
        let Some(profile) = self.mirror.get(profile_id) else {
            log::warn!("award_points: unknown profile {}", profile_id);
            return;
        };
        let updated = profile.with_award(amount, affects_xp);
        let mut patch = Map::new();
        patch.insert("points".into(), json!(updated.points));
        patch.insert("xp".into(), json!(updated.xp));
        patch.insert("level".into(), json!(updated.level));
        patch.insert("title".into(), json!(updated.title));
        patch_doc(&self.client, collections::PROFILES, profile_id, patch).await;
    }

    /// Append a badge to a profile; awarding a held badge is a no-op
    pub async fn award_badge(&self, profile_id: &str, badge: &str) {
        let Some(profile) = self.mirror.get(profile_id) else {
            log::warn!("award_badge: unknown profile {}", profile_id);
            return;
        };
        if profile.badges.iter().any(|b| b == badge) {
            return;
        }
        let mut badges = profile.badges;
        badges.push(badge.to_string());
        let mut patch = Map::new();
        patch.insert("badges".into(), json!(badges));
        patch_doc(&self.client, collections::PROFILES, profile_id, patch).await;
    }
}
