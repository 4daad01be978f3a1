//! Domain model for the shared household.
//!
//! # Responsibility
//! - Define the four persisted entity shapes plus the settings document.
//! - Define the [`Entity`] contract the generic collection store builds on.
//! - Hold draft validation rules shared by the service layer.
//!
//! # Invariants
//! - Every persisted record is identified by a stable [`EntityId`].
//! - Wire field names are camelCase; enum values are lowercase words.
//! - Date-only fields are `NaiveDate`, instants are `DateTime<Utc>`.
//!
//! # See also
//! - [`crate::store::collection`] for the CRUD semantics on top.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod chore;
pub mod expense;
pub mod reminder;
pub mod roommate;
pub mod settings;

/// Stable identifier shared by every persisted household record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = Uuid;

/// Contract between an entity type and the generic collection store.
///
/// `Draft` is what callers hand in on create (everything but the id);
/// `Patch` is the all-optional shape for partial updates. The store owns
/// id assignment, so `from_draft` is the only way a record is born.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Storage key the whole collection is persisted under.
    const COLLECTION_KEY: &'static str;

    /// Creation payload, id-less.
    type Draft;

    /// Partial update payload; absent fields leave the record untouched.
    type Patch;

    /// Builds a full record from a store-assigned id and a draft.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Returns this record's stable id.
    fn id(&self) -> EntityId;

    /// Shallow-merges `patch` into this record.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Rejection reasons raised by draft validation at the service gate.
///
/// Stores themselves never validate; see [`crate::service`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace. Carries the wire name.
    EmptyField(&'static str),
    /// A monetary amount was zero or negative.
    NonPositiveAmount(f64),
    /// Split parts do not add up to the expense amount.
    SplitMismatch { amount: f64, split_total: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field '{field}' must not be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {amount}")
            }
            Self::SplitMismatch {
                amount,
                split_total,
            } => write!(
                f,
                "split parts sum to {split_total} but the expense amount is {amount}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Derives display initials from a name: first two non-whitespace
/// characters, uppercased ("You" -> "YO", "Jordan" -> "JO").
pub fn derive_initials(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}
