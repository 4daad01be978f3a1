//! Household façade service.
//!
//! # Responsibility
//! - Bundle the four collection stores plus the settings store behind
//!   the one object UI layers hold.
//! - Gate creations behind draft validation and fill in derived fields.
//! - Run the periodic rollovers (overdue reminders, chore rotation).
//!
//! # Invariants
//! - Stores stay non-throwing; every rejection happens here, before a
//!   store is touched.
//! - Initials are never empty once a record passed `add_*`.

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::model::chore::{Chore, ChoreDraft, ChorePatch, ChoreStatus};
use crate::model::expense::{Expense, ExpenseDraft};
use crate::model::reminder::{Reminder, ReminderDraft, ReminderPatch, ReminderStatus};
use crate::model::roommate::{Roommate, RoommateDraft};
use crate::model::settings::{HouseholdSettings, SettingsPatch};
use crate::model::{derive_initials, EntityId, ValidationError};
use crate::store::{CollectionStore, SettingsStore, StorageMedium};

/// Serializable whole-state view for one-call UI hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSnapshot {
    pub expenses: Vec<Expense>,
    pub chores: Vec<Chore>,
    pub reminders: Vec<Reminder>,
    pub roommates: Vec<Roommate>,
    pub settings: HouseholdSettings,
}

/// Use-case façade over the five persisted stores.
pub struct HouseholdService<M: StorageMedium> {
    expenses: CollectionStore<Expense, M>,
    chores: CollectionStore<Chore, M>,
    reminders: CollectionStore<Reminder, M>,
    roommates: CollectionStore<Roommate, M>,
    settings: SettingsStore<M>,
}

impl<M: StorageMedium + Clone> HouseholdService<M> {
    /// Builds and hydrates all five stores from clones of one medium.
    pub fn hydrate(medium: M) -> Self {
        let service = Self {
            expenses: CollectionStore::hydrate(medium.clone()),
            chores: CollectionStore::hydrate(medium.clone()),
            reminders: CollectionStore::hydrate(medium.clone()),
            roommates: CollectionStore::hydrate(medium.clone()),
            settings: SettingsStore::hydrate(medium),
        };
        info!(
            "event=household_hydrate module=service status=ok expenses={} chores={} reminders={} roommates={}",
            service.expenses.len(),
            service.chores.len(),
            service.reminders.len(),
            service.roommates.len()
        );
        service
    }
}

impl<M: StorageMedium> HouseholdService<M> {
    pub fn expenses(&self) -> &CollectionStore<Expense, M> {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut CollectionStore<Expense, M> {
        &mut self.expenses
    }

    pub fn chores(&self) -> &CollectionStore<Chore, M> {
        &self.chores
    }

    pub fn chores_mut(&mut self) -> &mut CollectionStore<Chore, M> {
        &mut self.chores
    }

    pub fn reminders(&self) -> &CollectionStore<Reminder, M> {
        &self.reminders
    }

    pub fn reminders_mut(&mut self) -> &mut CollectionStore<Reminder, M> {
        &mut self.reminders
    }

    pub fn roommates(&self) -> &CollectionStore<Roommate, M> {
        &self.roommates
    }

    pub fn roommates_mut(&mut self) -> &mut CollectionStore<Roommate, M> {
        &mut self.roommates
    }

    pub fn settings(&self) -> &HouseholdSettings {
        self.settings.get()
    }

    /// Validates and adds an expense. Empty payer initials are derived
    /// from the payer name.
    pub fn add_expense(&mut self, mut draft: ExpenseDraft) -> Result<EntityId, ValidationError> {
        draft.validate()?;
        if draft.paid_by_initials.trim().is_empty() {
            draft.paid_by_initials = derive_initials(&draft.paid_by);
        }
        Ok(self.expenses.add(draft))
    }

    /// Validates and adds a chore.
    pub fn add_chore(&mut self, draft: ChoreDraft) -> Result<EntityId, ValidationError> {
        draft.validate()?;
        Ok(self.chores.add(draft))
    }

    /// Validates and adds a reminder. Missing assignee initials are
    /// derived from the assignee name when one is set.
    pub fn add_reminder(&mut self, mut draft: ReminderDraft) -> Result<EntityId, ValidationError> {
        draft.validate()?;
        if draft.assigned_to_initials.is_none() {
            draft.assigned_to_initials = draft.assigned_to.as_deref().map(derive_initials);
        }
        Ok(self.reminders.add(draft))
    }

    /// Validates and adds a roommate. Empty initials are derived from
    /// the name.
    pub fn add_roommate(&mut self, mut draft: RoommateDraft) -> Result<EntityId, ValidationError> {
        draft.validate()?;
        if draft.initials.trim().is_empty() {
            draft.initials = derive_initials(&draft.name);
        }
        Ok(self.roommates.add(draft))
    }

    /// Flips one chore's status. Returns whether the chore exists.
    pub fn set_chore_status(&mut self, id: EntityId, status: ChoreStatus) -> bool {
        self.chores.update(
            id,
            ChorePatch {
                status: Some(status),
                ..ChorePatch::default()
            },
        )
    }

    /// Marks one reminder completed. Returns whether it exists.
    pub fn complete_reminder(&mut self, id: EntityId) -> bool {
        self.reminders.update(
            id,
            ReminderPatch {
                status: Some(ReminderStatus::Completed),
                ..ReminderPatch::default()
            },
        )
    }

    /// Flips pending reminders whose due date has passed to overdue.
    /// Returns how many flipped.
    pub fn refresh_reminder_statuses(&mut self, now: DateTime<Utc>) -> usize {
        let stale: Vec<EntityId> = self
            .reminders
            .list()
            .iter()
            .filter(|reminder| reminder.is_past_due(now))
            .map(|reminder| reminder.id)
            .collect();

        for id in &stale {
            self.reminders.update(
                *id,
                ReminderPatch {
                    status: Some(ReminderStatus::Overdue),
                    ..ReminderPatch::default()
                },
            );
        }

        if !stale.is_empty() {
            info!(
                "event=reminder_rollover module=service status=ok flipped={}",
                stale.len()
            );
        }
        stale.len()
    }

    /// Reopens completed recurring chores whose due date has passed,
    /// moving each to its next occurrence. No-op unless chore rotation
    /// is enabled in settings. Returns how many advanced.
    pub fn advance_recurring_chores(&mut self, today: NaiveDate) -> usize {
        if !self.settings.get().chore_rotation {
            return 0;
        }

        let due: Vec<(EntityId, NaiveDate)> = self
            .chores
            .list()
            .iter()
            .filter(|chore| !chore.is_pending() && chore.due_date <= today)
            .map(|chore| (chore.id, chore.frequency.advance(chore.due_date)))
            .collect();

        for (id, next_due) in &due {
            self.chores.update(
                *id,
                ChorePatch {
                    status: Some(ChoreStatus::Pending),
                    due_date: Some(*next_due),
                    ..ChorePatch::default()
                },
            );
        }

        if !due.is_empty() {
            info!(
                "event=chore_rotation module=service status=ok advanced={}",
                due.len()
            );
        }
        due.len()
    }

    /// Merges `patch` into the settings document.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.update(patch);
    }

    /// Replaces the settings document wholesale. Onboarding path.
    pub fn replace_settings(&mut self, settings: HouseholdSettings) {
        self.settings.replace(settings);
    }

    /// Clones the full state into a serializable snapshot.
    pub fn snapshot(&self) -> HouseholdSnapshot {
        HouseholdSnapshot {
            expenses: self.expenses.list().to_vec(),
            chores: self.chores.list().to_vec(),
            reminders: self.reminders.list().to_vec(),
            roommates: self.roommates.list().to_vec(),
            settings: self.settings.get().clone(),
        }
    }
}
