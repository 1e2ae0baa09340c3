//! Reward and PurchaseRecord Entities
//!
//! The reward catalogue is freely editable; the purchase ledger is
//! append-only and denormalized, capturing title and cost at purchase
//! time so later catalogue edits never rewrite history.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A catalogue entry spendable with points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub cost: u32,
    #[serde(default)]
    pub icon: String,
    /// Remote documents written by older app versions lack this field
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// Fields supplied when adding a reward to the catalogue
#[derive(Debug, Clone, Default)]
pub struct RewardDraft {
    pub title: String,
    pub cost: u32,
    pub icon: String,
    pub category: String,
}

/// Denormalized record of a successful spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub reward_title: String,
    pub purchased_by: String,
    /// Local-locale date string (`dd.mm.yyyy`)
    pub date: String,
    pub cost: u32,
}

impl Reward {
    pub fn from_draft(id: impl Into<String>, draft: RewardDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            cost: draft.cost,
            icon: draft.icon,
            category: if draft.category.is_empty() {
                default_category()
            } else {
                draft.category
            },
        }
    }

    /// The fixed catalogue written when the collection is first seen empty
    pub fn seed_set() -> Vec<Reward> {
        vec![
            Reward {
                id: "reward-gaming".to_string(),
                title: "1 hour of gaming".to_string(),
                cost: 50,
                icon: "🎮".to_string(),
                category: "fun".to_string(),
            },
            Reward {
                id: "reward-ice-cream".to_string(),
                title: "Ice cream outing".to_string(),
                cost: 100,
                icon: "🍦".to_string(),
                category: "food".to_string(),
            },
            Reward {
                id: "reward-chore-pass".to_string(),
                title: "Skip one chore".to_string(),
                cost: 150,
                icon: "🎫".to_string(),
                category: "privilege".to_string(),
            },
        ]
    }
}

impl Entity for Reward {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for PurchaseRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
