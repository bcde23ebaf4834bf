//! Aggregate reporting over expense sets
//!
//! Pure read-side functions. Callers pass an already visibility-filtered
//! slice; every sum is carried in `Decimal` so large batches never drift.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::expense::{Expense, ExpenseStatus};

/// Summary totals for an expense set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: Decimal,
    pub approved_total: Decimal,
    pub rejected_total: Decimal,
    pub pending_total: Decimal,
}

/// Computes per-status totals over `expenses`
///
/// Empty input yields all-zero totals.
pub fn summarize(expenses: &[&Expense]) -> Summary {
    let mut summary = Summary {
        total: Decimal::ZERO,
        approved_total: Decimal::ZERO,
        rejected_total: Decimal::ZERO,
        pending_total: Decimal::ZERO,
    };

    for expense in expenses {
        summary.total += expense.amount();
        match expense.status() {
            ExpenseStatus::Approved => summary.approved_total += expense.amount(),
            ExpenseStatus::Rejected => summary.rejected_total += expense.amount(),
            ExpenseStatus::Pending => summary.pending_total += expense.amount(),
        }
    }

    summary
}

/// Totals grouped by department
pub fn totals_by_department(expenses: &[&Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.department().to_string())
            .or_insert(Decimal::ZERO) += expense.amount();
    }
    totals
}

/// Totals grouped by submitting user
pub fn totals_by_employee(expenses: &[&Expense]) -> BTreeMap<Uuid, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.user_id()).or_insert(Decimal::ZERO) += expense.amount();
    }
    totals
}
