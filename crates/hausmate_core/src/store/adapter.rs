//! Whole-collection blob load/save over a storage medium.
//!
//! # Responsibility
//! - Serialize values to JSON and push them under their storage key.
//! - Hydrate values back, falling back to a caller-supplied default.
//!
//! # Invariants
//! - An absent key hydrates the default silently; first launch is not an
//!   error.
//! - Medium read failures and corrupt blobs hydrate the default with a
//!   warning. Corruption never panics and never surfaces to callers.
//! - Save failures are logged and swallowed; the caller's in-memory
//!   state stays authoritative for the session.

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::medium::StorageMedium;

/// Loads the value stored under `key`, or `default_value` when the key
/// is absent or the stored blob is unusable.
pub fn load<T, M>(medium: &M, key: &str, default_value: T) -> T
where
    T: DeserializeOwned,
    M: StorageMedium,
{
    let stored = match medium.get_item(key) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} error_code=medium_read_failed error={err}"
            );
            return default_value;
        }
    };

    let Some(blob) = stored else {
        // Nothing persisted yet under this key.
        return default_value;
    };

    match serde_json::from_str(&blob) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} error_code=corrupt_blob error={err}"
            );
            default_value
        }
    }
}

/// Serializes `value` and writes it under `key`. Failures are logged,
/// never raised.
pub fn save<T, M>(medium: &mut M, key: &str, value: &T)
where
    T: Serialize,
    M: StorageMedium,
{
    let blob = match serde_json::to_string(value) {
        Ok(blob) => blob,
        Err(err) => {
            error!(
                "event=store_save module=store status=error key={key} error_code=serialize_failed error={err}"
            );
            return;
        }
    };

    if let Err(err) = medium.set_item(key, &blob) {
        error!(
            "event=store_save module=store status=error key={key} error_code=medium_write_failed error={err}"
        );
    }
}
