//! Dashboard read models.
//!
//! # Responsibility
//! - Pure aggregation over store slices for the home screens: balances,
//!   category breakdown, recent and upcoming lists.
//!
//! # Invariants
//! - Nothing here mutates; all orderings are deterministic (ties broken
//!   by id).

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::chore::Chore;
use crate::model::expense::{Expense, ExpenseCategory};

/// What the household owes `member` and what `member` owes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    /// Others' shares of expenses `member` paid.
    pub total_owed: f64,
    /// `member`'s shares of expenses someone else paid.
    pub total_owing: f64,
}

impl BalanceSummary {
    /// Positive when the household owes `member` on balance.
    pub fn net(&self) -> f64 {
        self.total_owed - self.total_owing
    }
}

/// Computes the two-way balance between `member` and the rest of the
/// household from the split parts.
pub fn balance_summary(expenses: &[Expense], member: &str) -> BalanceSummary {
    let mut total_owed = 0.0;
    let mut total_owing = 0.0;

    for expense in expenses {
        if expense.paid_by == member {
            total_owed += expense
                .split_with
                .iter()
                .filter(|split| split.name != member)
                .map(|split| split.amount)
                .sum::<f64>();
        } else if let Some(split) = expense.split_with.iter().find(|split| split.name == member) {
            total_owing += split.amount;
        }
    }

    BalanceSummary {
        total_owed,
        total_owing,
    }
}

/// One category's slice of the overall spend.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
    pub transactions: usize,
    /// Share of overall spend in percent; 0 when nothing was spent.
    pub percentage: f64,
}

/// Totals per category, largest first. Categories without expenses are
/// omitted.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let total_spent: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let mut totals: Vec<CategoryTotal> = ExpenseCategory::ALL
        .iter()
        .filter_map(|&category| {
            let mut total = 0.0;
            let mut transactions = 0;
            for expense in expenses.iter().filter(|e| e.category == category) {
                total += expense.amount;
                transactions += 1;
            }
            if transactions == 0 {
                return None;
            }
            Some(CategoryTotal {
                category,
                total,
                transactions,
                percentage: if total_spent > 0.0 {
                    total / total_spent * 100.0
                } else {
                    0.0
                },
            })
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    totals
}

/// Newest expenses first (date desc, id asc tiebreak), capped at `limit`.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
    let mut ordered: Vec<&Expense> = expenses.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    ordered.truncate(limit);
    ordered
}

/// Pending chores, soonest due first (due asc, id asc tiebreak), capped
/// at `limit`.
pub fn upcoming_chores(chores: &[Chore], limit: usize) -> Vec<&Chore> {
    let mut ordered: Vec<&Chore> = chores.iter().filter(|chore| chore.is_pending()).collect();
    ordered.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));
    ordered.truncate(limit);
    ordered
}

/// Urgency bucket for a chore's due date relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreDueState {
    Overdue,
    DueToday,
    Upcoming,
}

/// Buckets a chore by its due date relative to `today`.
pub fn chore_due_state(chore: &Chore, today: NaiveDate) -> ChoreDueState {
    match chore.due_date.cmp(&today) {
        Ordering::Less => ChoreDueState::Overdue,
        Ordering::Equal => ChoreDueState::DueToday,
        Ordering::Greater => ChoreDueState::Upcoming,
    }
}
