//! Household-wide settings document.
//!
//! # Responsibility
//! - Define the single settings document and its merge patch.
//!
//! # Invariants
//! - Hydration is field-tolerant: a partial blob fills missing fields
//!   from the defaults instead of failing.

use serde::{Deserialize, Serialize};

use super::reminder::ReminderTone;

/// UI color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// The one settings document for the household. Persisted under the
/// `"settings"` key as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseholdSettings {
    pub household_name: String,
    /// Currency symbol prefixed to amounts in the UI.
    pub currency: String,
    /// BCP 47-ish language tag, e.g. "en".
    pub language: String,
    pub theme: Theme,
    /// Whether completed recurring chores reopen at their next occurrence.
    pub chore_rotation: bool,
    /// Default voice for reminders without an explicit tone.
    pub reminder_tone: ReminderTone,
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            household_name: String::new(),
            currency: "₹".to_string(),
            language: "en".to_string(),
            theme: Theme::Light,
            chore_rotation: true,
            reminder_tone: ReminderTone::Kind,
        }
    }
}

/// Merge patch for [`HouseholdSettings`]; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub household_name: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
    pub theme: Option<Theme>,
    pub chore_rotation: Option<bool>,
    pub reminder_tone: Option<ReminderTone>,
}

impl HouseholdSettings {
    /// Shallow-merges `patch` into this document.
    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        if let Some(household_name) = patch.household_name {
            self.household_name = household_name;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(chore_rotation) = patch.chore_rotation {
            self.chore_rotation = chore_rotation;
        }
        if let Some(reminder_tone) = patch.reminder_tone {
            self.reminder_tone = reminder_tone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_onboarding_seed() {
        let settings = HouseholdSettings::default();

        assert_eq!(settings.currency, "₹");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.chore_rotation);
        assert_eq!(settings.reminder_tone, ReminderTone::Kind);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut settings = HouseholdSettings::default();
        settings.household_name = "Flat 4B".to_string();

        settings.apply_patch(SettingsPatch {
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        });

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.household_name, "Flat 4B");
        assert_eq!(settings.currency, "₹");
    }

    #[test]
    fn partial_blob_hydrates_with_defaults() {
        let settings: HouseholdSettings =
            serde_json::from_str(r#"{"householdName":"Flat 4B","theme":"dark"}"#).unwrap();

        assert_eq!(settings.household_name, "Flat 4B");
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency, "₹");
        assert!(settings.chore_rotation);
    }
}
