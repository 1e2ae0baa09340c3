//! Hub Entities
//!
//! The shared shopping list and the sticky-note board from the Hub page.
//! Both are plain per-document state with no derived invariants.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Sticky-note background palette; new notes pick one at random
pub const NOTE_COLORS: [&str; 5] = ["#fef08a", "#fda4af", "#bae6fd", "#bbf7d0", "#e9d5ff"];

/// One line of the shared shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_bought: bool,
}

/// A sticky note on the shared board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: String,
    pub text: String,
    pub color: String,
    pub author: String,
}

impl Entity for ShoppingItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for StickyNote {
    fn id(&self) -> &str {
        &self.id
    }
}
