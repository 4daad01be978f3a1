//! Roommate domain model.
//!
//! # Responsibility
//! - Define the household member record and their notification
//!   preferences.
//!
//! # Invariants
//! - `initials` is display-cached from `name` and never empty once the
//!   record passed the service gate.

use serde::{Deserialize, Serialize};

use super::reminder::ReminderTone;
use super::{Entity, EntityId, ValidationError};

/// Per-roommate notification preferences. All fields optional; the
/// household-wide settings fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoommatePreferences {
    /// Preferred notification time of day, e.g. "09:00".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_tone: Option<ReminderTone>,
    /// Stored for the UI; the core never interprets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<bool>,
}

/// A member of the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roommate {
    pub id: EntityId,
    pub name: String,
    /// Cached avatar initials derived from `name`.
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<RoommatePreferences>,
}

/// Creation payload for [`Roommate`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoommateDraft {
    pub name: String,
    /// Left empty to have the service derive initials from `name`.
    #[serde(default)]
    pub initials: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<RoommatePreferences>,
}

/// Partial update for [`Roommate`]; absent fields keep their value.
/// Optional record fields can be set, not cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoommatePatch {
    pub name: Option<String>,
    pub initials: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<RoommatePreferences>,
}

impl RoommateDraft {
    /// Checks the draft against the roommate invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(())
    }
}

impl Entity for Roommate {
    const COLLECTION_KEY: &'static str = "roommates";

    type Draft = RoommateDraft;
    type Patch = RoommatePatch;

    fn from_draft(id: EntityId, draft: RoommateDraft) -> Self {
        Self {
            id,
            name: draft.name,
            initials: draft.initials,
            email: draft.email,
            phone: draft.phone,
            preferences: draft.preferences,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: RoommatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(initials) = patch.initials {
            self.initials = initials;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = Some(preferences);
        }
    }
}
