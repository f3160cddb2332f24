//! Expense Ledger: the session's append/remove-only log of spending.

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    core::{category::BudgetCategory, money::MAX_AMOUNT},
    error::{PlannerError, Result},
    types::recommendation::SuggestedBudgetBreakdown,
};

/// Identifier of an expense, unique within one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ExpenseId(u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exp-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: BudgetCategory,
    pub description: String,
    pub amount: Decimal,
}

/// Progress-bar state of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingStatus {
    OnTrack,
    /// More than 80% of the budget spent
    NearLimit,
    /// More than 100% of the budget spent
    OverBudget,
}

/// Suggested vs. actual spend for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: BudgetCategory,
    pub suggested: Decimal,
    pub actual: Decimal,
}

impl CategoryComparison {
    /// Suggested minus actual; negative when the category overran its suggestion.
    pub fn headroom(&self) -> Decimal {
        self.suggested - self.actual
    }
}

/// Session-scoped expense log.
///
/// Insertion order is the canonical order: [`ExpenseLedger::expenses`] is
/// oldest first, [`ExpenseLedger::recent`] is newest first.
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    next_id: u64,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an expense. A blank description falls back to the category label.
    ///
    /// Non-positive amounts and amounts above [`MAX_AMOUNT`] are rejected and leave the
    /// ledger unchanged.
    pub fn add_expense(
        &mut self,
        category: BudgetCategory,
        description: Option<&str>,
        amount: Decimal,
    ) -> Result<ExpenseId> {
        if amount <= Decimal::ZERO {
            return Err(PlannerError::invalid(
                "amount",
                format!("expense amount must be positive, got {amount}"),
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(PlannerError::invalid(
                "amount",
                format!("expense amount {amount} exceeds the maximum of {MAX_AMOUNT}"),
            ));
        }

        let description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(category.label())
            .to_string();

        self.next_id += 1;
        let id = ExpenseId(self.next_id);
        info!(
            target: "trip_planner::ledger",
            %id,
            category = category.as_str(),
            %amount,
            "expense logged"
        );
        self.expenses.push(Expense {
            id,
            category,
            description,
            amount,
        });
        Ok(id)
    }

    /// Remove an expense. Unknown ids are ignored, so removal is idempotent.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|expense| expense.id == id);
        match position {
            Some(index) => {
                debug!(target: "trip_planner::ledger", %id, "expense removed");
                Some(self.expenses.remove(index))
            }
            None => None,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Newest first, for a "recent expenses" list.
    pub fn recent(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_spent(&self) -> Decimal {
        saturating_sum(self.expenses.iter().map(|expense| expense.amount))
    }

    pub fn remaining(&self, total_budget: Decimal) -> Decimal {
        total_budget - self.total_spent()
    }

    /// Percentage of the budget spent, or `None` for a zero budget.
    ///
    /// A percentage too large to represent saturates at `Decimal::MAX`.
    pub fn percent_spent(&self, total_budget: Decimal) -> Option<Decimal> {
        if total_budget.is_zero() {
            return None;
        }
        let percent = self
            .total_spent()
            .checked_div(total_budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX);
        Some(percent)
    }

    pub fn spending_status(&self, total_budget: Decimal) -> SpendingStatus {
        let Some(percent) = self.percent_spent(total_budget) else {
            return if self.total_spent() > Decimal::ZERO {
                SpendingStatus::OverBudget
            } else {
                SpendingStatus::OnTrack
            };
        };

        if percent > Decimal::ONE_HUNDRED {
            SpendingStatus::OverBudget
        } else if percent > Decimal::from(80) {
            SpendingStatus::NearLimit
        } else {
            SpendingStatus::OnTrack
        }
    }

    /// Total for one category; zero when nothing was logged there.
    pub fn amount_for(&self, category: BudgetCategory) -> Decimal {
        let amounts = self
            .expenses
            .iter()
            .filter(|expense| expense.category == category)
            .map(|expense| expense.amount);
        saturating_sum(amounts)
    }

    /// Chart-ready per-category totals; categories with no spend are omitted.
    pub fn amounts_by_category(&self) -> BTreeMap<BudgetCategory, Decimal> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            let total = totals.entry(expense.category).or_insert(Decimal::ZERO);
            *total = saturating_add(*total, expense.amount);
        }
        totals
    }

    /// One row per category in the fixed set, zero-filled on either side.
    pub fn compare_to_suggested(
        &self,
        suggested: Option<&SuggestedBudgetBreakdown>,
    ) -> Vec<CategoryComparison> {
        BudgetCategory::ALL
            .into_iter()
            .map(|category| CategoryComparison {
                category,
                suggested: suggested
                    .map(|breakdown| breakdown.allocation(category))
                    .unwrap_or(Decimal::ZERO),
                actual: self.amount_for(category),
            })
            .collect()
    }
}

// Amounts are always positive, so overflow can only go upward.
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, saturating_add)
}
