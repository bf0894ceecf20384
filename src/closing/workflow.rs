//! Cash closing: prepare the replenishment request, validate and submit.

use super::report::{orders_revenue, products_sold, DailyReport, ProductSummary};
use crate::api::{ApiError, PosBackend};
use crate::constants::*;
use crate::inventory::requests::{build_request, principal_store, RequestKind, RequestTable};
use crate::models::{AuthUser, CashClosing, DailyExpense, LastClosing, NewCashClosing, Order};
use crate::notify::{Toast, ValidationError};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClosingError {
    #[error("{}", ERROR_CLOSING_UNAVAILABLE)]
    NotAllowed,

    #[error("{}", ERROR_CLOSING_NOTE)]
    NoteRequired,

    #[error("{}", ERROR_CLOSING_REQUEST)]
    RequestIncomplete,

    #[error("{}", ERROR_CLOSING_EXPENSES)]
    ExpensesIncomplete,

    #[error("{}", ERROR_CENTRAL_STORE)]
    CentralStoreMissing,

    #[error("{prefix}: {0}", prefix = ERROR_REPLENISHMENT)]
    Replenishment(ApiError),

    #[error("{prefix}: {0}", prefix = ERROR_CLOSING)]
    Api(#[from] ApiError),
}

impl ClosingError {
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClosingError::Replenishment(e) | ClosingError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Validation problems keep their own toast; submission failures share one
    pub fn to_validation(&self) -> ValidationError {
        let mut err = match self {
            ClosingError::NotAllowed => ValidationError::new(ERROR_CLOSING_UNAVAILABLE, ERROR_CLOSING_UNAVAILABLE_DESC),
            ClosingError::NoteRequired => ValidationError::new(ERROR_CLOSING_NOTE, ERROR_CLOSING_NOTE_DESC),
            ClosingError::RequestIncomplete => ValidationError::new(ERROR_CLOSING_REQUEST, ERROR_CLOSING_REQUEST_DESC),
            ClosingError::ExpensesIncomplete => {
                ValidationError::new(ERROR_CLOSING_EXPENSES, ERROR_CLOSING_EXPENSES_DESC)
            }
            _ => ValidationError::new(ERROR_CLOSING, ERROR_CLOSING_DESC),
        };
        err.session_expired = self.is_unauthorized();
        err
    }
}

/// State of the closing dialog
#[derive(Debug, Clone)]
pub struct ClosingDraft {
    pub note: String,
    /// Orders covered by this closing
    pub orders: Vec<Order>,
    pub last_closing: Option<LastClosing>,
    pub products_sold: Vec<ProductSummary>,
    pub request: RequestTable,
    /// Ordinal of this closing within the day
    pub closing_number: u32,
}

impl ClosingDraft {
    pub fn is_partial(&self) -> bool {
        self.closing_number > 1
    }

    pub fn total_revenue(&self) -> Decimal {
        orders_revenue(&self.orders)
    }

    pub fn validate(&self, report: &DailyReport) -> Result<(), ClosingError> {
        if self.note.trim().is_empty() {
            return Err(ClosingError::NoteRequired);
        }
        if !self.request.is_complete(RequestKind::Supply) {
            return Err(ClosingError::RequestIncomplete);
        }
        if !report.pending.all_valid() {
            return Err(ClosingError::ExpensesIncomplete);
        }
        Ok(())
    }
}

/// Orders created strictly after the previous closing of the day
pub fn orders_since<'a>(orders: &'a [Order], last: Option<&LastClosing>) -> Vec<&'a Order> {
    match last.and_then(|l| l.created_at) {
        Some(cutoff) => orders.iter().filter(|o| o.created_at > cutoff).collect(),
        None => orders.iter().collect(),
    }
}

/// Load what the closing dialog needs and preload the replenishment rows
pub async fn prepare_closing(
    backend: &dyn PosBackend,
    report: &DailyReport,
    store_id: &str,
    today: NaiveDate,
) -> Result<ClosingDraft, ClosingError> {
    if !report.can_close(today) {
        return Err(ClosingError::NotAllowed);
    }

    let last_closing = if report.closings_count > 0 {
        backend.last_closing_of_day(store_id, report.date).await?
    } else {
        None
    };

    let orders: Vec<Order> = orders_since(&report.orders, last_closing.as_ref())
        .into_iter()
        .cloned()
        .collect();
    let sold = products_sold(&orders);

    let catalog = backend.list_products().await?;
    let mut request = RequestTable::new();
    for item in &sold {
        if let Some(product) = catalog.iter().find(|p| p.id == item.product_id) {
            request.push(product.clone(), item.quantity_sold);
        }
    }

    log::info!(
        "Closing #{} prepared: {} orders, {} products sold, {} request lines",
        report.closings_count + 1,
        orders.len(),
        sold.len(),
        request.len()
    );

    Ok(ClosingDraft {
        note: String::new(),
        orders,
        last_closing,
        products_sold: sold,
        request,
        closing_number: report.closings_count + 1,
    })
}

/// Totals posted with the closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingTotals {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net_profit: Decimal,
}

/// Revenue of the covered orders against the pending expenses
pub fn closing_totals(draft: &ClosingDraft, report: &DailyReport) -> ClosingTotals {
    let revenue = draft.total_revenue();
    let expenses = report.pending.total();
    ClosingTotals {
        revenue,
        expenses,
        net_profit: revenue - expenses,
    }
}

#[derive(Debug, Clone)]
pub struct ClosingOutcome {
    pub closing: CashClosing,
    pub saved_expenses: Vec<DailyExpense>,
    pub store_request_id: String,
    pub request_lines: usize,
}

impl ClosingOutcome {
    pub fn toast(&self) -> Toast {
        let mut description = format!("Solicitud de reposición: {} productos", self.request_lines);
        if !self.saved_expenses.is_empty() {
            description.push_str(&format!("\nGastos guardados: {}", self.saved_expenses.len()));
        }
        description.push_str(&format!("\nCierre #{} registrado", self.closing.num_id));
        Toast::success(SUCCESS_CLOSING, description).with_duration(Duration::from_secs(5))
    }
}

/// Save pending expenses, request replenishment and post the closing.
///
/// Steps run one after another; a failure stops the sequence and whatever
/// was already created stays on the server.
pub async fn submit_closing(
    backend: &dyn PosBackend,
    report: &DailyReport,
    draft: &ClosingDraft,
    user: &AuthUser,
) -> Result<ClosingOutcome, ClosingError> {
    draft.validate(report)?;

    let mut saved_expenses = Vec::with_capacity(report.pending.len());
    for expense in report.pending.items() {
        let saved = backend.create_daily_expense(&expense.to_payload(user, report.date)).await?;
        log::debug!("Saved pending expense {} as {}", expense.temp_id, saved.id);
        saved_expenses.push(saved);
    }

    let stores = backend.list_stores().await?;
    if principal_store(&stores).is_none() {
        return Err(ClosingError::CentralStoreMissing);
    }
    let request = build_request(RequestKind::Supply, &draft.request, user, &stores, None, Utc::now())
        .map_err(|_| ClosingError::RequestIncomplete)?;
    let store_request = backend
        .create_store_request(&request)
        .await
        .map_err(ClosingError::Replenishment)?;

    let totals = closing_totals(draft, report);
    let closing = NewCashClosing {
        store_id: user.store_id.clone(),
        user_id: user.user_id.clone(),
        closing_date: report.date,
        description: draft.note.trim().to_string(),
        total_orders: draft.orders.len(),
        total_revenue: totals.revenue,
        total_expenses: totals.expenses,
        net_profit: totals.net_profit,
        store_request_id: store_request.id.clone(),
        order_ids: draft.orders.iter().map(|o| o.id.clone()).collect(),
        expense_ids: saved_expenses.iter().map(|e| e.id.clone()).collect(),
    };
    let closing = backend.create_cash_closing(&closing).await?;

    log::info!(
        "Cash closing #{} registered: revenue {}, expenses {}, net {}",
        closing.num_id,
        totals.revenue,
        totals.expenses,
        totals.net_profit
    );

    Ok(ClosingOutcome {
        closing,
        saved_expenses,
        store_request_id: store_request.id,
        request_lines: draft.request.len(),
    })
}
