//! Shop Store
//!
//! Reward catalogue and purchase ledger. A purchase debits points through
//! [`ProfileStore`] and appends a denormalized ledger record; the mirror
//! balance check is the primary guard against overdraft, the zero clamp
//! in the profile award path is only a safety net.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{today_local_string, DomainResult, PurchaseRecord, Reward, RewardDraft};
use crate::remote::{collections, CollectionClient};

use super::mirror::Mirror;
use super::profile_store::ProfileStore;
use super::{delete_doc, write_doc};

/// Reactive mirror of the `rewards` and `purchases` collections
pub struct ShopStore {
    client: Arc<dyn CollectionClient>,
    rewards: Mirror<Reward>,
    purchases: Mirror<PurchaseRecord>,
    profiles: Arc<ProfileStore>,
    seeded: AtomicBool,
}

impl ShopStore {
    /// Subscribe to both remote collections and start mirroring them
    pub async fn connect(
        client: Arc<dyn CollectionClient>,
        profiles: Arc<ProfileStore>,
    ) -> DomainResult<Arc<Self>> {
        let rewards = Mirror::attach(&client, collections::REWARDS).await?;
        let purchases = Mirror::attach(&client, collections::PURCHASES).await?;
        Ok(Arc::new(Self {
            client,
            rewards,
            purchases,
            profiles,
            seeded: AtomicBool::new(false),
        }))
    }

    /// Seed the reward catalogue iff it is empty; the ledger starts empty
    pub async fn bootstrap(&self) {
        if !self.rewards.is_empty() {
            return;
        }
        if self
            .seeded
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        log::info!("seeding reward catalogue");
        for reward in Reward::seed_set() {
            write_doc(&self.client, collections::REWARDS, &reward.id, &reward).await;
        }
    }

    /// Current catalogue state
    pub fn rewards(&self) -> Vec<Reward> {
        self.rewards.snapshot()
    }

    /// Current ledger state
    pub fn purchases(&self) -> Vec<PurchaseRecord> {
        self.purchases.snapshot()
    }

    /// Look up one reward in the mirror
    pub fn get_reward(&self, id: &str) -> Option<Reward> {
        self.rewards.get(id)
    }

    /// Change notifications for the catalogue
    pub fn watch_rewards(&self) -> watch::Receiver<Vec<Reward>> {
        self.rewards.watch()
    }

    /// Change notifications for the ledger
    pub fn watch_purchases(&self) -> watch::Receiver<Vec<PurchaseRecord>> {
        self.purchases.watch()
    }

    /// Add a reward to the catalogue with a fresh id
    pub async fn add_reward(&self, draft: RewardDraft) -> Reward {
        let reward = Reward::from_draft(Uuid::new_v4().to_string(), draft);
        write_doc(&self.client, collections::REWARDS, &reward.id, &reward).await;
        reward
    }

    /// Remove a reward; past purchases keep their denormalized copy
    pub async fn delete_reward(&self, id: &str) {
        delete_doc(&self.client, collections::REWARDS, id).await;
    }

    /// Purchase a reward for a profile.
    ///
    /// Looks up both the reward and the buyer in the local mirrors.
    /// Returns `false` with no mutation when either is unknown or the
    /// balance is short. Otherwise the debit is awaited, the ledger
    /// append is spawned without being awaited, and `true` returns
    /// immediately.
    ///
    /// The mirror read means two devices can both pass the balance check
    /// before either write echoes back; the ledger then overstates the
    /// spend. Known limitation of the read-then-write shape.
    pub async fn purchase(&self, reward_id: &str, profile_id: &str) -> bool {
        let Some(reward) = self.rewards.get(reward_id) else {
            log::warn!("purchase: unknown reward {}", reward_id);
            return false;
        };
        let Some(profile) = self.profiles.get(profile_id) else {
            log::warn!("purchase: unknown profile {}", profile_id);
            return false;
        };
        if profile.points < reward.cost {
            return false;
        }

        self.profiles
            .award_points(profile_id, -(reward.cost as i32), false)
            .await;

        let record = PurchaseRecord {
            id: Uuid::new_v4().to_string(),
            reward_title: reward.title,
            purchased_by: profile_id.to_string(),
            date: today_local_string(),
            cost: reward.cost,
        };
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            write_doc(&client, collections::PURCHASES, &record.id, &record).await;
        });
        true
    }
}
