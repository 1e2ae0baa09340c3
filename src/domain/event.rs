//! FamilyEvent Entity
//!
//! A shared calendar entry. No derived state; display ordering by date is
//! a read-side concern of the store.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::dates::{iso_date_in_days, today_iso_string};
use super::entity::Entity;

/// A calendar entry visible to the whole family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyEvent {
    pub id: String,
    pub title: String,
    /// ISO `yyyy-mm-dd`
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub created_by: String,
}

/// Fields supplied when creating an event
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub created_by: String,
}

/// Partial update for an event; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

impl EventUpdate {
    pub fn into_patch(self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".into(), json!(title));
        }
        if let Some(date) = self.date {
            patch.insert("date".into(), json!(date));
        }
        if let Some(time) = self.time {
            patch.insert("time".into(), json!(time));
        }
        if let Some(location) = self.location {
            patch.insert("location".into(), json!(location));
        }
        patch
    }
}

impl FamilyEvent {
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            created_by: draft.created_by,
        }
    }

    /// Two example events written when the collection is first seen empty
    pub fn seed_set() -> Vec<FamilyEvent> {
        vec![
            FamilyEvent {
                id: "event-dentist".to_string(),
                title: "Dentist appointment".to_string(),
                date: today_iso_string(),
                time: Some("14:30".to_string()),
                location: None,
                created_by: "ola".to_string(),
            },
            FamilyEvent {
                id: "event-cinema".to_string(),
                title: "Cinema premiere".to_string(),
                date: iso_date_in_days(2),
                time: Some("19:00".to_string()),
                location: Some("Multikino".to_string()),
                created_by: "maciek".to_string(),
            },
        ]
    }
}

impl Entity for FamilyEvent {
    fn id(&self) -> &str {
        &self.id
    }
}
