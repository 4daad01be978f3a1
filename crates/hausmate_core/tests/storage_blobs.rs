use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hausmate_core::db::migrations::latest_version;
use hausmate_core::db::open_db_in_memory;
use hausmate_core::store::adapter;
use hausmate_core::{
    equal_split, CollectionStore, Expense, ExpenseCategory, ExpenseDraft, HouseholdSettings,
    MediumError, MemoryStorage, Reminder, ReminderDraft, ReminderKind, ReminderPriority,
    ReminderStatus, SettingsStore, SqliteStorage, StorageMedium, Theme,
};
use rusqlite::Connection;

#[test]
fn adapter_roundtrips_a_collection_through_memory() {
    let mut medium = MemoryStorage::new();
    let expenses = vec![sample_expense()];

    adapter::save(&mut medium, "expenses", &expenses);
    let loaded: Vec<Expense> = adapter::load(&medium, "expenses", Vec::new());

    assert_eq!(loaded, expenses);
}

#[test]
fn adapter_returns_default_for_absent_key() {
    let medium = MemoryStorage::new();

    let loaded: Vec<Expense> = adapter::load(&medium, "expenses", Vec::new());
    assert!(loaded.is_empty());

    let settings = adapter::load(&medium, "settings", HouseholdSettings::default());
    assert_eq!(settings, HouseholdSettings::default());
}

#[test]
fn adapter_falls_back_to_default_on_corrupt_blob() {
    let mut medium = MemoryStorage::new();
    medium.set_item("expenses", "{definitely not json").unwrap();

    let loaded: Vec<Expense> = adapter::load(&medium, "expenses", Vec::new());
    assert!(loaded.is_empty());
}

#[test]
fn sqlite_medium_roundtrips_and_overwrites() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteStorage::try_new(&conn).unwrap();

    assert_eq!(storage.get_item("expenses").unwrap(), None);

    storage.set_item("expenses", "[]").unwrap();
    assert_eq!(storage.get_item("expenses").unwrap().as_deref(), Some("[]"));

    storage.set_item("expenses", r#"[{"x":1}]"#).unwrap();
    assert_eq!(
        storage.get_item("expenses").unwrap().as_deref(),
        Some(r#"[{"x":1}]"#)
    );
}

#[test]
fn sqlite_storage_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStorage::try_new(&conn) {
        Err(MediumError::SchemaNotMigrated { expected, found: 0 }) => assert!(expected > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a schema readiness error"),
    }
}

#[test]
fn sqlite_storage_rejects_connection_without_storage_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStorage::try_new(&conn);
    assert!(matches!(
        result,
        Err(MediumError::MissingTable("storage_items"))
    ));
}

#[test]
fn sqlite_storage_rejects_connection_missing_value_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE storage_items (key TEXT PRIMARY KEY NOT NULL);")
        .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStorage::try_new(&conn);
    assert!(matches!(
        result,
        Err(MediumError::MissingColumn {
            table: "storage_items",
            column: "value"
        })
    ));
}

#[test]
fn settings_store_fills_partial_blob_with_defaults() {
    let mut medium = MemoryStorage::new();
    medium
        .set_item("settings", r#"{"householdName":"Flat 4B","theme":"dark"}"#)
        .unwrap();

    let store = SettingsStore::hydrate(medium);

    assert_eq!(store.get().household_name, "Flat 4B");
    assert_eq!(store.get().theme, Theme::Dark);
    assert_eq!(store.get().currency, "₹");
    assert!(store.get().chore_rotation);
}

#[test]
fn settings_store_replace_swaps_the_whole_document() {
    let mut medium = MemoryStorage::new();
    medium
        .set_item("settings", r#"{"householdName":"Flat 4B","theme":"dark"}"#)
        .unwrap();
    let mut store = SettingsStore::hydrate(medium.clone());

    let onboarded = HouseholdSettings {
        currency: "€".to_string(),
        language: "de".to_string(),
        ..HouseholdSettings::default()
    };
    store.replace(onboarded.clone());

    // Not a merge: fields the replacement left at default win over the
    // previously stored name and theme.
    let rehydrated = SettingsStore::hydrate(medium);
    assert_eq!(rehydrated.get(), &onboarded);
    assert_eq!(rehydrated.get().household_name, "");
    assert_eq!(rehydrated.get().theme, Theme::Light);
}

#[test]
fn persisted_expense_blob_uses_camel_case_wire_names() {
    let medium = MemoryStorage::new();
    let mut store: CollectionStore<Expense, MemoryStorage> =
        CollectionStore::hydrate(medium.clone());
    store.add(groceries_draft());

    let blob = medium.get_item("expenses").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let first = &value[0];

    assert!(first.get("paidBy").is_some());
    assert!(first.get("paidByInitials").is_some());
    assert!(first.get("splitWith").is_some());
    assert!(first.get("paid_by").is_none());
    assert_eq!(first["date"], "2024-01-01");
    assert_eq!(first["category"], "food");
}

#[test]
fn persisted_reminder_due_date_roundtrips_as_instant() {
    let medium = MemoryStorage::new();
    let mut store: CollectionStore<Reminder, MemoryStorage> =
        CollectionStore::hydrate(medium.clone());
    let due = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
    store.add(rent_reminder_draft(due));

    let blob = medium.get_item("reminders").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let first = &value[0];

    assert_eq!(first["type"], "expense");
    let parsed: DateTime<Utc> = serde_json::from_value(first["dueDate"].clone()).unwrap();
    assert_eq!(parsed, due);

    // And a fresh store rebuilds the typed value.
    let rehydrated: CollectionStore<Reminder, MemoryStorage> = CollectionStore::hydrate(medium);
    assert_eq!(rehydrated.list()[0].due_date, due);
}

fn sample_expense() -> Expense {
    let medium = MemoryStorage::new();
    let mut store: CollectionStore<Expense, MemoryStorage> = CollectionStore::hydrate(medium);
    let id = store.add(groceries_draft());
    store.get(id).cloned().unwrap()
}

fn groceries_draft() -> ExpenseDraft {
    let household = vec!["You".to_string(), "Sam".to_string(), "Alex".to_string()];
    ExpenseDraft {
        description: "Groceries".to_string(),
        amount: 1800.0,
        paid_by: "You".to_string(),
        paid_by_initials: "YO".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category: ExpenseCategory::Food,
        split_with: equal_split(1800.0, &household),
    }
}

fn rent_reminder_draft(due: DateTime<Utc>) -> ReminderDraft {
    ReminderDraft {
        title: "Pay rent".to_string(),
        description: "Transfer before the 5th".to_string(),
        kind: ReminderKind::Expense,
        due_date: due,
        priority: ReminderPriority::High,
        status: ReminderStatus::Pending,
        assigned_to: Some("You".to_string()),
        assigned_to_initials: Some("YO".to_string()),
        amount: Some(12000.0),
        category: Some("utilities".to_string()),
        recurrence: Some("monthly".to_string()),
        tone: None,
    }
}
