//! Household settings document store.
//!
//! # Responsibility
//! - Hold the one settings document, hydrated once at construction.
//! - Persist the whole document after every replace or merge.
//!
//! # Invariants
//! - Absent or corrupt blobs hydrate [`HouseholdSettings::default`].

use log::info;

use super::adapter;
use super::medium::StorageMedium;
use crate::model::settings::{HouseholdSettings, SettingsPatch};

/// Storage key for the settings document.
pub const SETTINGS_KEY: &str = "settings";

/// Single-document store for [`HouseholdSettings`].
pub struct SettingsStore<M: StorageMedium> {
    medium: M,
    settings: HouseholdSettings,
}

impl<M: StorageMedium> SettingsStore<M> {
    /// Builds the store and hydrates the document from `medium`.
    pub fn hydrate(medium: M) -> Self {
        let settings = adapter::load(&medium, SETTINGS_KEY, HouseholdSettings::default());
        info!("event=settings_hydrate module=store status=ok");
        Self { medium, settings }
    }

    pub fn get(&self) -> &HouseholdSettings {
        &self.settings
    }

    /// Replaces the whole document and persists.
    pub fn replace(&mut self, settings: HouseholdSettings) {
        self.settings = settings;
        self.persist();
    }

    /// Merges `patch` into the document and persists.
    pub fn update(&mut self, patch: SettingsPatch) {
        self.settings.apply_patch(patch);
        self.persist();
    }

    fn persist(&mut self) {
        adapter::save(&mut self.medium, SETTINGS_KEY, &self.settings);
    }
}
