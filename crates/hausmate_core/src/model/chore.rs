//! Household chore domain model.
//!
//! # Responsibility
//! - Define the chore record with its status and recurrence frequency.
//! - Compute the next occurrence when a recurring chore rolls over.
//!
//! # Invariants
//! - `due_date` is a calendar day, no time component.
//! - A chore is either `pending` or `completed`; rollover reopens it.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ValidationError};

/// Chore lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoreStatus {
    Pending,
    Completed,
}

/// How often a chore recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoreFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChoreFrequency {
    /// Next occurrence after `from`. Saturates to `from` on calendar
    /// overflow rather than failing.
    pub fn advance(self, from: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
        };
        next.unwrap_or(from)
    }
}

/// A recurring household chore assigned to one roommate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Display name of the responsible roommate.
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: ChoreStatus,
    pub frequency: ChoreFrequency,
}

impl Chore {
    /// Whether this chore still needs doing.
    pub fn is_pending(&self) -> bool {
        self.status == ChoreStatus::Pending
    }
}

/// Creation payload for [`Chore`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: ChoreStatus,
    pub frequency: ChoreFrequency,
}

/// Partial update for [`Chore`]; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChorePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ChoreStatus>,
    pub frequency: Option<ChoreFrequency>,
}

impl ChoreDraft {
    /// Checks the draft against the chore invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if self.assigned_to.trim().is_empty() {
            return Err(ValidationError::EmptyField("assignedTo"));
        }
        Ok(())
    }
}

impl Entity for Chore {
    const COLLECTION_KEY: &'static str = "chores";

    type Draft = ChoreDraft;
    type Patch = ChorePatch;

    fn from_draft(id: EntityId, draft: ChoreDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            status: draft.status,
            frequency: draft.frequency,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: ChorePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
    }
}
