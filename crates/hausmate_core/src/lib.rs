//! Core domain logic for HausMate, a shared-household manager.
//! Business rules live here; the FFI and CLI layers stay thin.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chore::{Chore, ChoreDraft, ChoreFrequency, ChorePatch, ChoreStatus};
pub use model::expense::{
    equal_split, Expense, ExpenseCategory, ExpenseDraft, ExpensePatch, Split,
};
pub use model::reminder::{
    Reminder, ReminderDraft, ReminderKind, ReminderPatch, ReminderPriority, ReminderStatus,
    ReminderTone,
};
pub use model::roommate::{Roommate, RoommateDraft, RoommatePatch, RoommatePreferences};
pub use model::settings::{HouseholdSettings, SettingsPatch, Theme};
pub use model::{derive_initials, Entity, EntityId, ValidationError};
pub use service::dashboard::{
    balance_summary, category_breakdown, chore_due_state, recent_expenses, upcoming_chores,
    BalanceSummary, CategoryTotal, ChoreDueState,
};
pub use service::household::{HouseholdService, HouseholdSnapshot};
pub use store::{
    CollectionStore, MediumError, MediumResult, MemoryStorage, SettingsStore, SqliteStorage,
    StorageMedium, SETTINGS_KEY,
};

/// Cheap liveness check for FFI smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Reports the crate version compiled into the binary.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
