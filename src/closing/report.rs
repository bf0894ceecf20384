//! Daily sales report: orders, expenses and closings of one store and date.

use super::pending::PendingExpenses;
use crate::api::PosBackend;
use crate::constants::*;
use crate::models::{DailyExpense, Order};
use crate::notify::ValidationError;
use crate::utils::datetime::format_date_long;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Sales of one product over a set of orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i64,
    pub total_revenue: Decimal,
}

fn summarize<'a, I>(orders: I, skip_unknown: bool) -> Vec<ProductSummary>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summary: Vec<ProductSummary> = Vec::new();

    for detail in orders.into_iter().flat_map(|o| o.details.iter()) {
        let product_id = match detail.product_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None if skip_unknown => continue,
            None => UNKNOWN_PRODUCT_ID.to_string(),
        };
        let slot = *index.entry(product_id.clone()).or_insert_with(|| {
            summary.push(ProductSummary {
                product_id,
                product_name: detail
                    .product
                    .as_ref()
                    .map(|p| p.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                quantity_sold: 0,
                total_revenue: Decimal::ZERO,
            });
            summary.len() - 1
        });
        summary[slot].quantity_sold += detail.quantity;
        summary[slot].total_revenue += detail.price;
    }
    summary
}

/// Group order details by product, first appearance first
pub fn products_summary(orders: &[Order]) -> Vec<ProductSummary> {
    summarize(orders, false)
}

/// Like [`products_summary`] but details without a product are dropped
pub fn products_sold<'a, I>(orders: I) -> Vec<ProductSummary>
where
    I: IntoIterator<Item = &'a Order>,
{
    summarize(orders, true)
}

pub fn orders_revenue<'a, I>(orders: I) -> Decimal
where
    I: IntoIterator<Item = &'a Order>,
{
    orders.into_iter().map(|o| o.total_price).sum()
}

#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub orders: Vec<Order>,
    pub expenses: Vec<DailyExpense>,
    pub pending: PendingExpenses,
    pub closings_count: u32,
}

impl DailyReport {
    pub fn new(date: NaiveDate, orders: Vec<Order>, expenses: Vec<DailyExpense>, closings_count: u32) -> Self {
        Self {
            date,
            orders,
            expenses,
            pending: PendingExpenses::default(),
            closings_count,
        }
    }

    pub fn products_summary(&self) -> Vec<ProductSummary> {
        products_summary(&self.orders)
    }

    pub fn total_quantity(&self) -> i64 {
        self.orders.iter().flat_map(|o| o.details.iter()).map(|d| d.quantity).sum()
    }

    pub fn total_revenue(&self) -> Decimal {
        orders_revenue(&self.orders)
    }

    pub fn saved_expenses_total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Saved plus pending expenses
    pub fn total_expenses(&self) -> Decimal {
        self.saved_expenses_total() + self.pending.total()
    }

    pub fn net_profit(&self) -> Decimal {
        self.total_revenue() - self.total_expenses()
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// Closing needs today's report and at least one order
    pub fn can_close(&self, today: NaiveDate) -> bool {
        self.is_today(today) && !self.orders.is_empty()
    }

    /// Why the closing button is disabled, if it is
    pub fn closing_hint(&self, today: NaiveDate) -> Option<&'static str> {
        if !self.is_today(today) {
            Some("Solo puedes hacer cierre de caja del día actual")
        } else if self.orders.is_empty() {
            Some("No hay órdenes para cerrar")
        } else {
            None
        }
    }

    /// Banner shown above the report
    pub fn banner(&self, today: NaiveDate) -> Option<String> {
        if !self.is_today(today) {
            Some(format!(
                "Estás viendo el historial del {}. Solo puedes realizar cierres de caja del día actual.",
                format_date_long(self.date)
            ))
        } else if self.closings_count > 0 {
            Some(format!(
                "Ya se han realizado {} cierre(s) de caja hoy. Los productos mostrados son desde el último cierre.",
                self.closings_count
            ))
        } else {
            None
        }
    }

    /// Apply a finished closing
    pub fn record_closing(&mut self, saved: Vec<DailyExpense>) {
        self.expenses.extend(saved);
        self.pending.clear();
        self.closings_count += 1;
    }
}

/// Fetch orders, saved expenses and the closings count for a date
pub async fn load_report(backend: &dyn PosBackend, store_id: &str, date: NaiveDate) -> Result<DailyReport, ValidationError> {
    let load_err = |e: crate::api::ApiError| {
        log::error!("Daily report for {} failed: {}", date, e);
        ValidationError::api(ERROR_REPORT_LOAD, &e)
    };

    let orders = backend.list_orders(store_id, Some(date)).await.map_err(load_err)?;
    let expenses = backend.list_daily_expenses(store_id, date).await.map_err(load_err)?;
    let closings = backend.count_closings(store_id, date).await.map_err(load_err)?;

    log::info!(
        "Report {}: {} orders, {} expenses, {} closings",
        date,
        orders.len(),
        expenses.len(),
        closings
    );
    Ok(DailyReport::new(date, orders, expenses, closings))
}

/// Same-day rule for deleting a saved expense
pub fn check_can_delete(is_today: bool) -> Result<(), ValidationError> {
    if is_today {
        Ok(())
    } else {
        Err(ValidationError::new(ERROR_EXPENSE_NOT_ALLOWED, ERROR_EXPENSE_DELETE_DESC))
    }
}

/// Delete a saved expense and drop it from the report
pub async fn delete_expense(
    backend: &dyn PosBackend,
    report: &mut DailyReport,
    expense_id: &str,
    is_today: bool,
) -> Result<(), ValidationError> {
    check_can_delete(is_today)?;
    backend.delete_daily_expense(expense_id).await.map_err(|e| {
        log::error!("Deleting expense {} failed: {}", expense_id, e);
        let mut err = ValidationError::new(ERROR_EXPENSE_DELETE, ERROR_EXPENSE_DELETE_FAILED_DESC);
        err.session_expired = e.is_unauthorized();
        err
    })?;
    report.expenses.retain(|e| e.id != expense_id);
    Ok(())
}
