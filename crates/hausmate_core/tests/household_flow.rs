use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hausmate_core::db::open_db_in_memory;
use hausmate_core::{
    balance_summary, equal_split, upcoming_chores, ChoreDraft, ChoreFrequency, ChoreStatus,
    ExpenseCategory, ExpenseDraft, HouseholdService, HouseholdSettings, ReminderDraft,
    ReminderKind, ReminderPriority, ReminderStatus, RoommateDraft, SettingsPatch, SqliteStorage,
    Theme, ValidationError,
};

#[test]
fn expense_flow_over_sqlite_survives_rehydration() {
    let conn = open_db_in_memory().unwrap();

    let expense_id = {
        let storage = SqliteStorage::try_new(&conn).unwrap();
        let mut household = HouseholdService::hydrate(storage);

        for name in ["You", "Sam", "Alex"] {
            household.add_roommate(roommate_draft(name)).unwrap();
        }
        household.add_expense(groceries_draft()).unwrap()
    };

    let storage = SqliteStorage::try_new(&conn).unwrap();
    let household = HouseholdService::hydrate(storage);

    let expense = household.expenses().get(expense_id).unwrap();
    assert_eq!(expense.description, "Groceries");
    assert_eq!(expense.split_with.len(), 3);
    assert_eq!(household.roommates().len(), 3);
    assert_eq!(household.roommates().list()[0].initials, "YO");
    assert_eq!(household.roommates().list()[1].initials, "SA");
}

#[test]
fn mismatched_splits_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    let mut draft = groceries_draft();
    draft.split_with[0].amount = 999.0;

    let err = household.add_expense(draft).unwrap_err();
    assert!(matches!(err, ValidationError::SplitMismatch { .. }));
    assert!(household.expenses().is_empty());

    let persisted_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM storage_items WHERE key = 'expenses';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(persisted_rows, 0);
}

#[test]
fn expense_payer_initials_are_derived_when_blank() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    let mut draft = groceries_draft();
    draft.paid_by = "Jordan".to_string();
    draft.paid_by_initials = String::new();

    let id = household.add_expense(draft).unwrap();
    assert_eq!(household.expenses().get(id).unwrap().paid_by_initials, "JO");
}

#[test]
fn pending_reminders_past_due_flip_to_overdue() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let past = household
        .add_reminder(reminder_draft(
            "Pay rent",
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        ))
        .unwrap();
    let future = household
        .add_reminder(reminder_draft(
            "Water plants",
            Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        ))
        .unwrap();
    let completed = household
        .add_reminder(reminder_draft(
            "Split internet bill",
            Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
        ))
        .unwrap();
    assert!(household.complete_reminder(completed));

    let flipped = household.refresh_reminder_statuses(now);

    assert_eq!(flipped, 1);
    assert_eq!(
        household.reminders().get(past).unwrap().status,
        ReminderStatus::Overdue
    );
    assert_eq!(
        household.reminders().get(future).unwrap().status,
        ReminderStatus::Pending
    );
    assert_eq!(
        household.reminders().get(completed).unwrap().status,
        ReminderStatus::Completed
    );

    // Second pass finds nothing new.
    assert_eq!(household.refresh_reminder_statuses(now), 0);
}

#[test]
fn reminder_assignee_initials_are_derived_when_missing() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    let mut draft = reminder_draft("Buy detergent", Utc::now());
    draft.assigned_to = Some("Sam".to_string());
    draft.assigned_to_initials = None;

    let id = household.add_reminder(draft).unwrap();
    assert_eq!(
        household
            .reminders()
            .get(id)
            .unwrap()
            .assigned_to_initials
            .as_deref(),
        Some("SA")
    );
}

#[test]
fn chore_rotation_reopens_completed_chores_at_next_occurrence() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    let today = date("2024-01-10");
    let daily = household
        .add_chore(chore_draft("Take out trash", "2024-01-09", ChoreFrequency::Daily))
        .unwrap();
    let weekly = household
        .add_chore(chore_draft("Clean bathroom", "2024-01-08", ChoreFrequency::Weekly))
        .unwrap();
    let open = household
        .add_chore(chore_draft("Vacuum", "2024-01-09", ChoreFrequency::Daily))
        .unwrap();
    assert!(household.set_chore_status(daily, ChoreStatus::Completed));
    assert!(household.set_chore_status(weekly, ChoreStatus::Completed));

    let advanced = household.advance_recurring_chores(today);

    assert_eq!(advanced, 2);
    let rolled = household.chores().get(daily).unwrap();
    assert_eq!(rolled.status, ChoreStatus::Pending);
    assert_eq!(rolled.due_date, date("2024-01-10"));
    assert_eq!(
        household.chores().get(weekly).unwrap().due_date,
        date("2024-01-15")
    );
    // Still-pending chores are left alone.
    assert_eq!(household.chores().get(open).unwrap().due_date, date("2024-01-09"));
}

#[test]
fn chore_rotation_respects_the_settings_toggle() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    household.update_settings(SettingsPatch {
        chore_rotation: Some(false),
        ..SettingsPatch::default()
    });

    let id = household
        .add_chore(chore_draft("Water plants", "2024-01-01", ChoreFrequency::Daily))
        .unwrap();
    household.set_chore_status(id, ChoreStatus::Completed);

    assert_eq!(household.advance_recurring_chores(date("2024-01-10")), 0);
    assert_eq!(
        household.chores().get(id).unwrap().status,
        ChoreStatus::Completed
    );
}

#[test]
fn settings_updates_survive_rehydration() {
    let conn = open_db_in_memory().unwrap();

    {
        let storage = SqliteStorage::try_new(&conn).unwrap();
        let mut household = HouseholdService::hydrate(storage);
        household.update_settings(SettingsPatch {
            household_name: Some("Flat 4B".to_string()),
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        });
    }

    let storage = SqliteStorage::try_new(&conn).unwrap();
    let household = HouseholdService::hydrate(storage);

    assert_eq!(household.settings().household_name, "Flat 4B");
    assert_eq!(household.settings().theme, Theme::Dark);
    assert_eq!(household.settings().currency, "₹");
}

#[test]
fn onboarding_replace_overwrites_prior_settings() {
    let conn = open_db_in_memory().unwrap();

    {
        let storage = SqliteStorage::try_new(&conn).unwrap();
        let mut household = HouseholdService::hydrate(storage);
        household.update_settings(SettingsPatch {
            household_name: Some("Flat 4B".to_string()),
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        });
        household.replace_settings(HouseholdSettings {
            currency: "$".to_string(),
            chore_rotation: false,
            ..HouseholdSettings::default()
        });
    }

    let storage = SqliteStorage::try_new(&conn).unwrap();
    let household = HouseholdService::hydrate(storage);

    let expected = HouseholdSettings {
        currency: "$".to_string(),
        chore_rotation: false,
        ..HouseholdSettings::default()
    };
    assert_eq!(household.settings(), &expected);
    // Not a merge: the patched name and theme did not survive the replace.
    assert_eq!(household.settings().household_name, "");
    assert_eq!(household.settings().theme, Theme::Light);
}

#[test]
fn snapshot_serializes_with_camel_case_sections() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    household.add_expense(groceries_draft()).unwrap();
    household
        .add_chore(chore_draft("Trash", "2024-01-02", ChoreFrequency::Daily))
        .unwrap();

    let payload = serde_json::to_value(household.snapshot()).unwrap();

    assert!(payload["expenses"][0].get("paidBy").is_some());
    assert!(payload["chores"][0].get("dueDate").is_some());
    assert!(payload["settings"].get("choreRotation").is_some());
    assert!(payload.get("roommates").is_some());
    assert!(payload.get("reminders").is_some());
}

#[test]
fn dashboard_models_read_from_the_stores() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut household = HouseholdService::hydrate(storage);

    household.add_expense(groceries_draft()).unwrap();
    let mut sam_draft = groceries_draft();
    sam_draft.description = "Internet".to_string();
    sam_draft.amount = 900.0;
    sam_draft.paid_by = "Sam".to_string();
    sam_draft.paid_by_initials = "SA".to_string();
    sam_draft.category = ExpenseCategory::Utilities;
    sam_draft.split_with = equal_split(900.0, &names());
    household.add_expense(sam_draft).unwrap();

    household
        .add_chore(chore_draft("Trash", "2024-01-05", ChoreFrequency::Daily))
        .unwrap();
    household
        .add_chore(chore_draft("Vacuum", "2024-01-03", ChoreFrequency::Weekly))
        .unwrap();

    let summary = balance_summary(household.expenses().list(), "You");
    assert!((summary.total_owed - 1200.0).abs() < 1e-9);
    assert!((summary.total_owing - 300.0).abs() < 1e-9);
    assert!((summary.net() - 900.0).abs() < 1e-9);

    let upcoming = upcoming_chores(household.chores().list(), 5);
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].title, "Vacuum");
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn names() -> Vec<String> {
    vec!["You".to_string(), "Sam".to_string(), "Alex".to_string()]
}

fn groceries_draft() -> ExpenseDraft {
    ExpenseDraft {
        description: "Groceries".to_string(),
        amount: 1800.0,
        paid_by: "You".to_string(),
        paid_by_initials: "YO".to_string(),
        date: date("2024-01-01"),
        category: ExpenseCategory::Food,
        split_with: equal_split(1800.0, &names()),
    }
}

fn chore_draft(title: &str, due: &str, frequency: ChoreFrequency) -> ChoreDraft {
    ChoreDraft {
        title: title.to_string(),
        description: String::new(),
        assigned_to: "You".to_string(),
        due_date: date(due),
        status: ChoreStatus::Pending,
        frequency,
    }
}

fn reminder_draft(title: &str, due: DateTime<Utc>) -> ReminderDraft {
    ReminderDraft {
        title: title.to_string(),
        description: String::new(),
        kind: ReminderKind::Custom,
        due_date: due,
        priority: ReminderPriority::Medium,
        status: ReminderStatus::Pending,
        assigned_to: None,
        assigned_to_initials: None,
        amount: None,
        category: None,
        recurrence: None,
        tone: None,
    }
}

fn roommate_draft(name: &str) -> RoommateDraft {
    RoommateDraft {
        name: name.to_string(),
        initials: String::new(),
        email: None,
        phone: None,
        preferences: None,
    }
}
