//! Reminder domain model.
//!
//! # Responsibility
//! - Define the reminder record shared by expense, chore and custom
//!   reminders.
//! - Decide when a pending reminder counts as overdue.
//!
//! # Invariants
//! - `due_date` is a full instant (UTC), unlike the date-only entities.
//! - `overdue` is derived from `pending` + a passed due date, never set
//!   directly by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ValidationError};

/// What a reminder is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    /// Money owed or due, e.g. a bill.
    Expense,
    /// Nudge for an assigned chore.
    Chore,
    /// Anything else the household wants to remember.
    Custom,
}

/// Urgency bucket used for ordering and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    High,
    Medium,
    Low,
}

/// Reminder lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
    Overdue,
}

/// Voice used when the reminder is surfaced to the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderTone {
    Funny,
    Kind,
    Passive,
    Formal,
}

/// A dated nudge, optionally tied to money or a roommate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Serialized as `type` to match the wire schema.
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub due_date: DateTime<Utc>,
    pub priority: ReminderPriority,
    pub status: ReminderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_initials: Option<String>,
    /// Meaningful for `kind == ReminderKind::Expense`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form repeat hint, e.g. "weekly"; not interpreted by the core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<ReminderTone>,
}

impl Reminder {
    /// Whether this reminder is pending with a due date in the past.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ReminderStatus::Pending && self.due_date < now
    }
}

/// Creation payload for [`Reminder`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub due_date: DateTime<Utc>,
    pub priority: ReminderPriority,
    pub status: ReminderStatus,
    pub assigned_to: Option<String>,
    pub assigned_to_initials: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub recurrence: Option<String>,
    pub tone: Option<ReminderTone>,
}

/// Partial update for [`Reminder`]; absent fields keep their value.
/// Optional record fields can be set, not cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ReminderKind>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<ReminderPriority>,
    pub status: Option<ReminderStatus>,
    pub assigned_to: Option<String>,
    pub assigned_to_initials: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub recurrence: Option<String>,
    pub tone: Option<ReminderTone>,
}

impl ReminderDraft {
    /// Checks the draft against the reminder invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        Ok(())
    }
}

impl Entity for Reminder {
    const COLLECTION_KEY: &'static str = "reminders";

    type Draft = ReminderDraft;
    type Patch = ReminderPatch;

    fn from_draft(id: EntityId, draft: ReminderDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            assigned_to: draft.assigned_to,
            assigned_to_initials: draft.assigned_to_initials,
            amount: draft.amount,
            category: draft.category,
            recurrence: draft.recurrence,
            tone: draft.tone,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: ReminderPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = Some(assigned_to);
        }
        if let Some(assigned_to_initials) = patch.assigned_to_initials {
            self.assigned_to_initials = Some(assigned_to_initials);
        }
        if let Some(amount) = patch.amount {
            self.amount = Some(amount);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(recurrence) = patch.recurrence {
            self.recurrence = Some(recurrence);
        }
        if let Some(tone) = patch.tone {
            self.tone = Some(tone);
        }
    }
}
