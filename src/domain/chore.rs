//! Chore Entity
//!
//! A recurring or one-off task definition plus its completion ledger.
//! Recurrence governs same-day dedup and checklist reset only; nothing in
//! the system reschedules or regenerates chores in the background.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::entity::Entity;

/// Nominal repeat cadence of a chore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

/// One independently toggleable sub-step of a chore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_done: false,
        }
    }
}

/// One completion record; at most one per local calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreRecord {
    /// Local-locale date string (`dd.mm.yyyy`)
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub completed_by: String,
}

/// A task definition with a reward and completion history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Point reward, fixed at creation, editable by update
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Assigned profile id; `None` means shared/"everyone"
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Append-only completion ledger
    #[serde(default)]
    pub history: Vec<ChoreRecord>,
}

/// Fields supplied when creating a chore (id and history are assigned)
#[derive(Debug, Clone, Default)]
pub struct ChoreDraft {
    pub title: String,
    pub description: Option<String>,
    pub points: u32,
    pub recurrence: Recurrence,
    pub assigned_to: Option<String>,
    pub checklist: Vec<ChecklistItem>,
}

/// Partial update for a chore; `None` fields are left untouched.
/// The completion history is deliberately not updatable through this path.
#[derive(Debug, Clone, Default)]
pub struct ChoreUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub points: Option<u32>,
    pub recurrence: Option<Recurrence>,
    pub assigned_to: Option<Option<String>>,
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl ChoreUpdate {
    /// Render the set fields as a partial document
    pub fn into_patch(self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".into(), json!(title));
        }
        if let Some(description) = self.description {
            patch.insert("description".into(), json!(description));
        }
        if let Some(points) = self.points {
            patch.insert("points".into(), json!(points));
        }
        if let Some(recurrence) = self.recurrence {
            patch.insert("recurrence".into(), json!(recurrence));
        }
        if let Some(assigned_to) = self.assigned_to {
            patch.insert("assignedTo".into(), json!(assigned_to));
        }
        if let Some(checklist) = self.checklist {
            patch.insert("checklist".into(), json!(checklist));
        }
        patch
    }
}

impl Chore {
    /// Materialize a draft into a chore with an empty history
    pub fn from_draft(id: impl Into<String>, draft: ChoreDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            points: draft.points,
            recurrence: draft.recurrence,
            assigned_to: draft.assigned_to,
            checklist: draft.checklist,
            history: Vec::new(),
        }
    }

    /// True iff the history holds a record for the given local date string
    pub fn completed_on(&self, date: &str) -> bool {
        self.history.iter().any(|record| record.date == date)
    }

    /// The fixed starter set written when the collection is first seen empty
    pub fn seed_set() -> Vec<Chore> {
        vec![
            Chore {
                id: "chore-vacuum".to_string(),
                title: "Vacuum the whole house".to_string(),
                description: None,
                points: 30,
                recurrence: Recurrence::Weekly,
                assigned_to: None,
                checklist: vec![
                    ChecklistItem::new("vacuum-living-room", "Living room"),
                    ChecklistItem::new("vacuum-bedroom", "Bedroom"),
                    ChecklistItem::new("vacuum-hallway", "Hallway"),
                ],
                history: Vec::new(),
            },
            Chore {
                id: "chore-trash".to_string(),
                title: "Take out the trash".to_string(),
                description: None,
                points: 10,
                recurrence: Recurrence::Daily,
                assigned_to: None,
                checklist: Vec::new(),
                history: Vec::new(),
            },
        ]
    }
}

impl Entity for Chore {
    fn id(&self) -> &str {
        &self.id
    }
}
