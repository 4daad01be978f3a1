//! Persisted storage layer.
//!
//! # Responsibility
//! - Abstract the key-value medium collections are persisted on.
//! - Load/save whole collections as JSON blobs with safe fallbacks.
//! - Provide the generic CRUD store the service layer composes.
//!
//! # Invariants
//! - Each collection occupies exactly one storage key.
//! - Read failures degrade to defaults; write failures are logged and
//!   swallowed. The in-memory state stays authoritative for the session.
//!
//! # See also
//! - [`crate::db`] for the SQLite schema behind [`SqliteStorage`].

pub mod adapter;
pub mod collection;
pub mod medium;
pub mod settings;

pub use collection::CollectionStore;
pub use medium::{MediumError, MediumResult, MemoryStorage, SqliteStorage, StorageMedium};
pub use settings::{SettingsStore, SETTINGS_KEY};
