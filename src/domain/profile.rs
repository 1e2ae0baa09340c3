//! Profile Entity
//!
//! A family member's identity plus their points/xp/level/badge ledger.
//! `xp` is the authoritative progression value; `level` and `title` are a
//! denormalized projection of it, rewritten on every award and never set
//! independently.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Experience points per level step
pub const XP_PER_LEVEL: u32 = 100;

/// Profile role, kept for permission checks in the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Parent,
    Child,
}

/// A family member's identity and progression record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable human-chosen slug, never regenerated
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// Spendable balance, clamped at zero
    #[serde(default)]
    pub points: u32,
    /// Authoritative progression value
    #[serde(default)]
    pub xp: u32,
    /// Derived from `xp`, see [`level_for_xp`]
    #[serde(default = "default_level")]
    pub level: u32,
    /// Derived from `level`, see [`title_for_level`]
    #[serde(default = "default_title")]
    pub title: String,
    /// Append-only, duplicate-free set of badge identifiers
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub theme_color: String,
}

fn default_level() -> u32 {
    1
}

fn default_title() -> String {
    title_for_level(1).to_string()
}

/// Level as a pure function of xp: one level per [`XP_PER_LEVEL`]
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Display title for a level; the highest threshold met wins
pub fn title_for_level(level: u32) -> &'static str {
    match level {
        l if l >= 50 => "Perfect Homekeeper",
        l if l >= 20 => "Organization Master",
        l if l >= 10 => "Organizer",
        l if l >= 5 => "Helper",
        _ => "Beginner",
    }
}

/// Recompute the `(level, title)` projection for an xp value
pub fn progression(xp: u32) -> (u32, &'static str) {
    let level = level_for_xp(xp);
    (level, title_for_level(level))
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Parent,
            points: 0,
            xp: 0,
            level: 1,
            title: title_for_level(1).to_string(),
            badges: Vec::new(),
            avatar: String::new(),
            theme_color: String::new(),
        }
    }

    /// The fixed profile set written when the collection is first seen empty
    pub fn seed_set() -> Vec<Profile> {
        let mut ola = Profile::new("ola", "Ola");
        ola.avatar = "👩".to_string();
        ola.theme_color = "var(--color-secondary)".to_string();

        let mut maciek = Profile::new("maciek", "Maciek");
        maciek.avatar = "👨".to_string();
        maciek.theme_color = "var(--color-primary)".to_string();

        vec![ola, maciek]
    }

    /// Apply a point award (or debit, when `amount` is negative).
    ///
    /// Points clamp at zero. Xp grows only for positive, xp-affecting
    /// amounts; spending never reduces xp, level, or title.
    pub fn with_award(&self, amount: i32, affects_xp: bool) -> Profile {
        let points = (self.points as i64 + amount as i64).max(0) as u32;
        let xp = if affects_xp && amount > 0 {
            self.xp + amount as u32
        } else {
            self.xp
        };
        let (level, title) = progression(xp);
        Profile {
            points,
            xp,
            level,
            title: title.to_string(),
            ..self.clone()
        }
    }
}

impl Entity for Profile {
    fn id(&self) -> &str {
        &self.id
    }
}
