//! Expenses typed on the report but not saved yet.

use crate::constants::*;
use crate::models::{AuthUser, ExpenseCategory, NewDailyExpense};
use crate::notify::ValidationError;
use crate::utils::datetime::utc_midnight;
use crate::utils::money::{parse_amount_or_zero, to_plain_string};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExpense {
    pub temp_id: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: String,
}

impl Default for PendingExpense {
    fn default() -> Self {
        Self {
            temp_id: format!("temp-{}", uuid::Uuid::new_v4()),
            category: ExpenseCategory::Other,
            description: String::new(),
            amount: String::new(),
        }
    }
}

impl PendingExpense {
    /// Unparseable amounts count as zero
    pub fn amount_value(&self) -> Decimal {
        parse_amount_or_zero(&self.amount)
    }

    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty() && self.amount_value() > Decimal::ZERO
    }

    /// `expenseDate` is the report date at 00:00 UTC
    pub fn to_payload(&self, user: &AuthUser, date: NaiveDate) -> NewDailyExpense {
        NewDailyExpense {
            store_id: user.store_id.clone(),
            user_id: user.user_id.clone(),
            category: self.category,
            description: self.description.trim().to_string(),
            amount: to_plain_string(self.amount_value()),
            expense_date: utc_midnight(date),
        }
    }
}

/// Unsaved expense rows, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingExpenses {
    items: Vec<PendingExpense>,
}

impl PendingExpenses {
    pub fn items(&self) -> &[PendingExpense] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// New blank row; only allowed while the report shows today
    pub fn add(&mut self, is_today: bool) -> Result<&mut PendingExpense, ValidationError> {
        if !is_today {
            return Err(ValidationError::new(ERROR_EXPENSE_NOT_ALLOWED, ERROR_EXPENSE_ADD_DESC));
        }
        self.items.push(PendingExpense::default());
        let idx = self.items.len() - 1;
        Ok(&mut self.items[idx])
    }

    pub fn get_mut(&mut self, temp_id: &str) -> Option<&mut PendingExpense> {
        self.items.iter_mut().find(|e| e.temp_id == temp_id)
    }

    pub fn set_category(&mut self, temp_id: &str, category: ExpenseCategory) {
        if let Some(expense) = self.get_mut(temp_id) {
            expense.category = category;
        }
    }

    pub fn set_description(&mut self, temp_id: &str, description: impl Into<String>) {
        if let Some(expense) = self.get_mut(temp_id) {
            expense.description = description.into();
        }
    }

    pub fn set_amount(&mut self, temp_id: &str, amount: impl Into<String>) {
        if let Some(expense) = self.get_mut(temp_id) {
            expense.amount = amount.into();
        }
    }

    pub fn remove(&mut self, temp_id: &str) {
        self.items.retain(|e| e.temp_id != temp_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(PendingExpense::amount_value).sum()
    }

    /// Vacuously true when there is nothing pending
    pub fn all_valid(&self) -> bool {
        self.items.iter().all(PendingExpense::is_valid)
    }
}
