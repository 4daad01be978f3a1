//! Flutter-facing use-case calls, exported through FRB.
//!
//! # Responsibility
//! - Give Dart one function per household use case.
//! - Keep failures inside response envelopes; nothing crosses the
//!   boundary as a panic or exception.
//!
//! # Invariants
//! - Mutation payloads are camelCase JSON drafts/patches; snapshots are
//!   camelCase JSON documents.
//! - Every export is `frb(sync)`; work happens on the calling thread.

use chrono::Utc;
use hausmate_core::db::open_db;
use hausmate_core::{
    ChoreDraft, ChoreStatus, EntityId, ExpenseDraft, ExpensePatch, HouseholdService,
    ReminderDraft, RoommateDraft, SettingsPatch, SqliteStorage,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DATA_DB_FILE_NAME: &str = "hausmate_data.sqlite3";
static DATA_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Liveness check for the Dart side.
///
/// # FFI contract
/// - Sync call, no I/O.
/// - Never throws; the reply is a constant string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    hausmate_core::ping().to_owned()
}

/// Version of the bundled Rust core.
///
/// # FFI contract
/// - Sync call, no I/O.
/// - Never throws; the manifest version comes back verbatim.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    hausmate_core::core_version().to_owned()
}

/// Starts rolling file logs for the Rust side, once per process.
///
/// `level` is one of `trace|debug|info|warn|error` (case-insensitive);
/// `log_dir` must be an absolute directory.
///
/// # FFI contract
/// - Sync call; creates the log directory when missing.
/// - Idempotent for the same `level + log_dir`; conflicts return an error.
/// - Never panics; empty string means success, anything else is the
///   error message.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match hausmate_core::init_logging(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected record, when one applies.
    pub id: Option<String>,
    /// Message for diagnostics and UI toasts.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Result envelope carrying a JSON document for read calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotResponse {
    /// Whether the read succeeded.
    pub ok: bool,
    /// camelCase JSON payload; empty on failure.
    pub payload: String,
    /// Failure detail; empty when `ok`.
    pub message: String,
}

impl SnapshotResponse {
    fn success(payload: String) -> Self {
        Self {
            ok: true,
            payload,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: String::new(),
            message: message.into(),
        }
    }
}

/// Returns the whole household state as one JSON document.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Payload sections: `expenses`, `chores`, `reminders`, `roommates`,
///   `settings`.
#[flutter_rust_bridge::frb(sync)]
pub fn household_snapshot() -> SnapshotResponse {
    match with_household(|household| serde_json::to_string(&household.snapshot())) {
        Ok(Ok(payload)) => SnapshotResponse::success(payload),
        Ok(Err(err)) => SnapshotResponse::failure(format!("household_snapshot failed: {err}")),
        Err(err) => SnapshotResponse::failure(format!("household_snapshot failed: {err}")),
    }
}

/// Adds an expense from a camelCase JSON draft.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Returns the assigned id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn expense_add(draft_json: String) -> ActionResponse {
    let draft: ExpenseDraft = match parse_payload("expense_add", &draft_json) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match with_household(|household| household.add_expense(draft)) {
        Ok(Ok(id)) => ActionResponse::success("Expense added.", Some(id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(format!("expense_add failed: {err}")),
        Err(err) => ActionResponse::failure(format!("expense_add failed: {err}")),
    }
}

/// Applies a partial update to one expense.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Unknown ids report failure without touching stored data.
#[flutter_rust_bridge::frb(sync)]
pub fn expense_update(id: String, patch_json: String) -> ActionResponse {
    let id = match parse_id("expense_update", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch: ExpensePatch = match parse_payload("expense_update", &patch_json) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    match with_household(|household| household.expenses_mut().update(id, patch)) {
        Ok(true) => ActionResponse::success("Expense updated.", Some(id.to_string())),
        Ok(false) => ActionResponse::failure("expense_update failed: no expense with that id"),
        Err(err) => ActionResponse::failure(format!("expense_update failed: {err}")),
    }
}

/// Deletes one expense. Absent ids are a quiet no-op.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn expense_delete(id: String) -> ActionResponse {
    let id = match parse_id("expense_delete", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match with_household(|household| household.expenses_mut().delete(id)) {
        Ok(true) => ActionResponse::success("Expense deleted.", Some(id.to_string())),
        Ok(false) => ActionResponse::success("Expense already absent.", None),
        Err(err) => ActionResponse::failure(format!("expense_delete failed: {err}")),
    }
}

/// Adds a chore from a camelCase JSON draft.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Returns the assigned id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_add(draft_json: String) -> ActionResponse {
    let draft: ChoreDraft = match parse_payload("chore_add", &draft_json) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match with_household(|household| household.add_chore(draft)) {
        Ok(Ok(id)) => ActionResponse::success("Chore added.", Some(id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(format!("chore_add failed: {err}")),
        Err(err) => ActionResponse::failure(format!("chore_add failed: {err}")),
    }
}

/// Marks one chore completed or reopens it.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_set_status(id: String, completed: bool) -> ActionResponse {
    let id = match parse_id("chore_set_status", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let status = if completed {
        ChoreStatus::Completed
    } else {
        ChoreStatus::Pending
    };

    match with_household(|household| household.set_chore_status(id, status)) {
        Ok(true) => ActionResponse::success("Chore status set.", Some(id.to_string())),
        Ok(false) => ActionResponse::failure("chore_set_status failed: no chore with that id"),
        Err(err) => ActionResponse::failure(format!("chore_set_status failed: {err}")),
    }
}

/// Deletes one chore. Absent ids are a quiet no-op.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_delete(id: String) -> ActionResponse {
    let id = match parse_id("chore_delete", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match with_household(|household| household.chores_mut().delete(id)) {
        Ok(true) => ActionResponse::success("Chore deleted.", Some(id.to_string())),
        Ok(false) => ActionResponse::success("Chore already absent.", None),
        Err(err) => ActionResponse::failure(format!("chore_delete failed: {err}")),
    }
}

/// Reopens completed recurring chores whose due date has passed, using
/// today's date. Honors the chore-rotation settings toggle.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_advance_recurring() -> ActionResponse {
    let today = Utc::now().date_naive();
    match with_household(|household| household.advance_recurring_chores(today)) {
        Ok(advanced) => ActionResponse::success(format!("Advanced {advanced} chore(s)."), None),
        Err(err) => ActionResponse::failure(format!("chore_advance_recurring failed: {err}")),
    }
}

/// Adds a reminder from a camelCase JSON draft.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Returns the assigned id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_add(draft_json: String) -> ActionResponse {
    let draft: ReminderDraft = match parse_payload("reminder_add", &draft_json) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match with_household(|household| household.add_reminder(draft)) {
        Ok(Ok(id)) => ActionResponse::success("Reminder added.", Some(id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(format!("reminder_add failed: {err}")),
        Err(err) => ActionResponse::failure(format!("reminder_add failed: {err}")),
    }
}

/// Marks one reminder completed.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_complete(id: String) -> ActionResponse {
    let id = match parse_id("reminder_complete", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match with_household(|household| household.complete_reminder(id)) {
        Ok(true) => ActionResponse::success("Reminder completed.", Some(id.to_string())),
        Ok(false) => ActionResponse::failure("reminder_complete failed: no reminder with that id"),
        Err(err) => ActionResponse::failure(format!("reminder_complete failed: {err}")),
    }
}

/// Deletes one reminder. Absent ids are a quiet no-op.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(id: String) -> ActionResponse {
    let id = match parse_id("reminder_delete", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match with_household(|household| household.reminders_mut().delete(id)) {
        Ok(true) => ActionResponse::success("Reminder deleted.", Some(id.to_string())),
        Ok(false) => ActionResponse::success("Reminder already absent.", None),
        Err(err) => ActionResponse::failure(format!("reminder_delete failed: {err}")),
    }
}

/// Flips pending reminders past their due instant to overdue, using the
/// current time.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_refresh_statuses() -> ActionResponse {
    match with_household(|household| household.refresh_reminder_statuses(Utc::now())) {
        Ok(flipped) => {
            ActionResponse::success(format!("Marked {flipped} reminder(s) overdue."), None)
        }
        Err(err) => ActionResponse::failure(format!("reminder_refresh_statuses failed: {err}")),
    }
}

/// Adds a roommate from a camelCase JSON draft.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
/// - Returns the assigned id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn roommate_add(draft_json: String) -> ActionResponse {
    let draft: RoommateDraft = match parse_payload("roommate_add", &draft_json) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match with_household(|household| household.add_roommate(draft)) {
        Ok(Ok(id)) => ActionResponse::success("Roommate added.", Some(id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(format!("roommate_add failed: {err}")),
        Err(err) => ActionResponse::failure(format!("roommate_add failed: {err}")),
    }
}

/// Deletes one roommate. Absent ids are a quiet no-op.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn roommate_delete(id: String) -> ActionResponse {
    let id = match parse_id("roommate_delete", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match with_household(|household| household.roommates_mut().delete(id)) {
        Ok(true) => ActionResponse::success("Roommate deleted.", Some(id.to_string())),
        Ok(false) => ActionResponse::success("Roommate already absent.", None),
        Err(err) => ActionResponse::failure(format!("roommate_delete failed: {err}")),
    }
}

/// Returns the household settings document as JSON.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> SnapshotResponse {
    match with_household(|household| serde_json::to_string(household.settings())) {
        Ok(Ok(payload)) => SnapshotResponse::success(payload),
        Ok(Err(err)) => SnapshotResponse::failure(format!("settings_get failed: {err}")),
        Err(err) => SnapshotResponse::failure(format!("settings_get failed: {err}")),
    }
}

/// Merges a camelCase JSON patch into the settings document.
///
/// # FFI contract
/// - Sync call against the household DB on the calling thread.
/// - Never panics; failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update(patch_json: String) -> ActionResponse {
    let patch: SettingsPatch = match parse_payload("settings_update", &patch_json) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    match with_household(|household| household.update_settings(patch)) {
        Ok(()) => ActionResponse::success("Settings updated.", None),
        Err(err) => ActionResponse::failure(format!("settings_update failed: {err}")),
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    op: &str,
    payload: &str,
) -> Result<T, ActionResponse> {
    serde_json::from_str(payload).map_err(|err| {
        warn!("event=ffi_payload module=ffi status=error op={op} error={err}");
        ActionResponse::failure(format!("{op} failed: invalid payload: {err}"))
    })
}

fn parse_id(op: &str, value: &str) -> Result<EntityId, ActionResponse> {
    Uuid::parse_str(value.trim())
        .map_err(|err| ActionResponse::failure(format!("{op} failed: invalid id `{value}`: {err}")))
}

fn resolve_data_db_path() -> PathBuf {
    DATA_DB_PATH
        .get_or_init(|| match std::env::var("HAUSMATE_DB_PATH") {
            Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
            _ => std::env::temp_dir().join(DATA_DB_FILE_NAME),
        })
        .clone()
}

fn with_household<R>(
    f: impl FnOnce(&mut HouseholdService<SqliteStorage<'_>>) -> R,
) -> Result<R, String> {
    let db_path = resolve_data_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("data DB open failed: {err}"))?;
    let storage =
        SqliteStorage::try_new(&conn).map_err(|err| format!("storage init failed: {err}"))?;
    let mut household = HouseholdService::hydrate(storage);
    Ok(f(&mut household))
}
