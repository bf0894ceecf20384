use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::ExpenseCategory;

/// Operational expense recorded for a store and day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyExpense {
    pub id: String,
    pub store_id: String,
    pub user_id: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
    pub expense_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashClosing {
    pub id: String,
    pub num_id: i64,
    pub store_id: String,
    pub user_id: String,
    /// Kept as text: the backend answers with a date or a full timestamp
    pub closing_date: Option<String>,
    pub description: String,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub store_request_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Most recent closing of a day, with the orders it covered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LastClosing {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub orders: Vec<ClosingOrderRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosingOrderRef {
    pub order: OrderRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderRef {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingCount {
    pub count: u32,
}

/// Body of `POST /api/daily-expense`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyExpense {
    pub store_id: String,
    pub user_id: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: String,
    pub expense_date: DateTime<Utc>,
}

/// Body of `POST /api/cash-closing`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashClosing {
    pub store_id: String,
    pub user_id: String,
    pub closing_date: NaiveDate,
    pub description: String,
    pub total_orders: usize,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub store_request_id: String,
    pub order_ids: Vec<String>,
    pub expense_ids: Vec<String>,
}
