//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde and chrono).

mod chore;
mod dates;
mod entity;
mod event;
mod hub;
mod profile;
mod shop;

pub use chore::{ChecklistItem, Chore, ChoreDraft, ChoreRecord, ChoreUpdate, Recurrence};
pub use dates::{iso_date_in_days, now_time_string, today_iso_string, today_local_string};
pub use entity::{DomainError, DomainResult, Entity};
pub use event::{EventDraft, EventUpdate, FamilyEvent};
pub use hub::{ShoppingItem, StickyNote, NOTE_COLORS};
pub use profile::{level_for_xp, progression, title_for_level, Profile, Role, XP_PER_LEVEL};
pub use shop::{PurchaseRecord, Reward, RewardDraft};
