//! Shared expense domain model.
//!
//! # Responsibility
//! - Define the expense record, its category union and split parts.
//! - Validate expense drafts (positive amount, splits that add up).
//!
//! # Invariants
//! - `split_with` parts, when present, sum to `amount` within half a cent.
//! - `date` is the purchase day, no time component.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, ValidationError};

/// Splits may drift from the total by at most half a cent before a draft
/// is rejected.
pub const SPLIT_TOLERANCE: f64 = 0.005;

/// Spending category for grouping and breakdown views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Utilities,
    Household,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Utilities,
        Self::Household,
        Self::Entertainment,
        Self::Other,
    ];

    /// Wire/display label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Household => "household",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

/// One participant's share of an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub name: String,
    pub amount: f64,
}

/// A shared household expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: EntityId,
    pub description: String,
    pub amount: f64,
    /// Display name of whoever fronted the money.
    pub paid_by: String,
    /// Cached initials for avatar rendering; derived from `paid_by`.
    pub paid_by_initials: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    /// How the amount is divided. Empty means the payer carries it alone.
    pub split_with: Vec<Split>,
}

/// Creation payload for [`Expense`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    /// Left empty to have the service derive initials from `paid_by`.
    #[serde(default)]
    pub paid_by_initials: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub split_with: Vec<Split>,
}

/// Partial update for [`Expense`]; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub paid_by: Option<String>,
    pub paid_by_initials: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub split_with: Option<Vec<Split>>,
}

impl ExpenseDraft {
    /// Checks the draft against the expense invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }
        if self.paid_by.trim().is_empty() {
            return Err(ValidationError::EmptyField("paidBy"));
        }
        if self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if !self.split_with.is_empty() {
            let split_total = self.split_with.iter().map(|split| split.amount).sum::<f64>();
            if (split_total - self.amount).abs() > SPLIT_TOLERANCE {
                return Err(ValidationError::SplitMismatch {
                    amount: self.amount,
                    split_total,
                });
            }
        }
        Ok(())
    }
}

impl Entity for Expense {
    const COLLECTION_KEY: &'static str = "expenses";

    type Draft = ExpenseDraft;
    type Patch = ExpensePatch;

    fn from_draft(id: EntityId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            paid_by: draft.paid_by,
            paid_by_initials: draft.paid_by_initials,
            date: draft.date,
            category: draft.category,
            split_with: draft.split_with,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: ExpensePatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(paid_by) = patch.paid_by {
            self.paid_by = paid_by;
        }
        if let Some(paid_by_initials) = patch.paid_by_initials {
            self.paid_by_initials = paid_by_initials;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(split_with) = patch.split_with {
            self.split_with = split_with;
        }
    }
}

/// Divides `amount` evenly across `names`, cent-exact: leading
/// participants absorb the remainder cents so parts sum to the rounded
/// total.
pub fn equal_split(amount: f64, names: &[String]) -> Vec<Split> {
    if names.is_empty() {
        return Vec::new();
    }

    let participant_count = names.len() as i64;
    let total_cents = (amount * 100.0).round() as i64;
    let base_cents = total_cents / participant_count;
    let extra_cents = total_cents % participant_count;

    names
        .iter()
        .enumerate()
        .map(|(index, name)| Split {
            name: name.clone(),
            amount: (base_cents + i64::from((index as i64) < extra_cents)) as f64 / 100.0,
        })
        .collect()
}
