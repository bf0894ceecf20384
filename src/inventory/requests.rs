//! Stock requests: supply, return and relocation drafts, the requests list and
//! the status stepper.

use crate::api::PosBackend;
use crate::constants::*;
use crate::filter::FilterConfig;
use crate::models::{
    AuthUser, NewStoreRequest, NewStoreRequestDetail, Product, RequestStatus, RequestType, ReturnReason, Store,
    StoreRequest,
};
use crate::notify::ValidationError;
use crate::table::{CellRender, Column, TableConfig};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Which request form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestKind {
    #[default]
    Supply,
    Return,
    Relocation,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [RequestKind::Supply, RequestKind::Return, RequestKind::Relocation];

    pub fn request_type(self) -> RequestType {
        match self {
            RequestKind::Supply => RequestType::SupplyRequest,
            RequestKind::Return => RequestType::ReturnRequest,
            RequestKind::Relocation => RequestType::RelocationRequest,
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            RequestKind::Supply => "Solicitud",
            RequestKind::Return => "Devolución",
            RequestKind::Relocation => "Reubicación",
        }
    }

    fn incomplete(self) -> ValidationError {
        match self {
            RequestKind::Supply => ValidationError::new(ERROR_REQUEST_INCOMPLETE, ERROR_INCOMPLETE_DESC),
            RequestKind::Return => ValidationError::new(ERROR_RETURN_INCOMPLETE, ERROR_RETURN_INCOMPLETE_DESC),
            RequestKind::Relocation => {
                ValidationError::new(ERROR_RELOCATION_INCOMPLETE, ERROR_RELOCATION_INCOMPLETE_DESC)
            }
        }
    }

    /// Success toast title and description
    pub fn success(self) -> (&'static str, &'static str) {
        match self {
            RequestKind::Supply => (SUCCESS_REQUEST_CREATED, SUCCESS_REQUEST_CREATED_DESC),
            RequestKind::Return => (SUCCESS_RETURN_CREATED, SUCCESS_RETURN_CREATED_DESC),
            RequestKind::Relocation => (SUCCESS_RELOCATION_CREATED, SUCCESS_RELOCATION_CREATED_DESC),
        }
    }

    fn create_error_title(self) -> &'static str {
        match self {
            RequestKind::Supply => ERROR_REQUEST_CREATE,
            RequestKind::Return => ERROR_RETURN_CREATE,
            RequestKind::Relocation => ERROR_RELOCATION_CREATE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRow {
    pub product: Option<Product>,
    pub quantity: i64,
    pub return_reason: Option<ReturnReason>,
}

impl RequestRow {
    fn is_complete(&self, kind: RequestKind) -> bool {
        let has_product = self.product.as_ref().is_some_and(|p| !p.id.is_empty());
        let has_reason = kind != RequestKind::Return || self.return_reason.is_some();
        has_product && self.quantity > 0 && has_reason
    }

    fn to_detail(&self, kind: RequestKind) -> Option<NewStoreRequestDetail> {
        let product = self.product.as_ref()?;
        Some(NewStoreRequestDetail {
            product_id: product.id.clone(),
            requested_quantity: self.quantity,
            unit_price: product.base_price,
            total_price: product.base_price * Decimal::from(self.quantity),
            return_reason: if kind == RequestKind::Return {
                self.return_reason
            } else {
                None
            },
        })
    }
}

/// Editable rows of a request form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestTable {
    rows: Vec<RequestRow>,
}

impl RequestTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RequestRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_row(&mut self) {
        self.rows.push(RequestRow::default());
    }

    /// Append a filled row
    pub fn push(&mut self, product: Product, quantity: i64) {
        self.rows.push(RequestRow {
            product: Some(product),
            quantity,
            return_reason: None,
        });
    }

    pub fn set_product(&mut self, index: usize, product: Product) {
        if let Some(row) = self.rows.get_mut(index) {
            row.product = Some(product);
        }
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) {
        if let Some(row) = self.rows.get_mut(index) {
            row.quantity = quantity.max(0);
        }
    }

    pub fn set_return_reason(&mut self, index: usize, reason: ReturnReason) {
        if let Some(row) = self.rows.get_mut(index) {
            row.return_reason = Some(reason);
        }
    }

    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Non-empty and every row filled in
    pub fn is_complete(&self, kind: RequestKind) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.is_complete(kind))
    }

    pub fn to_details(&self, kind: RequestKind) -> Vec<NewStoreRequestDetail> {
        self.rows.iter().filter_map(|r| r.to_detail(kind)).collect()
    }
}

/// Stores a relocation may target: not PRINCIPAL and not our own
pub fn relocation_targets<'a>(stores: &'a [Store], own_store_id: &str) -> Vec<&'a Store> {
    stores
        .iter()
        .filter(|s| !s.is_principal() && s.id != own_store_id)
        .collect()
}

pub fn principal_store(stores: &[Store]) -> Option<&Store> {
    stores.iter().find(|s| s.is_principal())
}

/// Validate a form and assemble the `POST /api/store-request` body
pub fn build_request(
    kind: RequestKind,
    table: &RequestTable,
    user: &AuthUser,
    stores: &[Store],
    relocation_target: Option<&str>,
    now: DateTime<Utc>,
) -> Result<NewStoreRequest, ValidationError> {
    let target_store_id = match kind {
        RequestKind::Relocation => {
            let target = relocation_target
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ValidationError::new(ERROR_TARGET_STORE, ERROR_TARGET_STORE_DESC))?;
            if !table.is_complete(kind) {
                return Err(kind.incomplete());
            }
            target.to_string()
        }
        RequestKind::Supply | RequestKind::Return => {
            if !table.is_complete(kind) {
                return Err(kind.incomplete());
            }
            principal_store(stores)
                .map(|s| s.id.clone())
                .ok_or_else(|| ValidationError::new(ERROR_CENTRAL_STORE, ERROR_RETRY_LATER))?
        }
    };

    Ok(NewStoreRequest {
        request_type: kind.request_type(),
        status: RequestStatus::Pending,
        requesting_store_id: user.store_id.clone(),
        requesting_user_id: user.user_id.clone(),
        target_store_id,
        requested_date: now,
        details: table.to_details(kind),
    })
}

/// Validate, resolve the target store and create the request
pub async fn submit_request(
    backend: &dyn PosBackend,
    kind: RequestKind,
    table: &RequestTable,
    user: &AuthUser,
    stores: &[Store],
    relocation_target: Option<&str>,
) -> Result<StoreRequest, ValidationError> {
    let request = build_request(kind, table, user, stores, relocation_target, Utc::now())?;
    log::info!(
        "Submitting {:?} with {} lines to store {}",
        request.request_type,
        request.details.len(),
        request.target_store_id
    );
    backend
        .create_store_request(&request)
        .await
        .map_err(|e| ValidationError::api(kind.create_error_title(), &e))
}

/// One row of the requests list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub id: String,
    pub request_number: String,
    pub request_type: RequestType,
    pub status: RequestStatus,
    /// Spanish type label, kept for filtering
    pub type_name: &'static str,
    pub target_store_name: String,
    pub requesting_user_name: String,
    pub requested_date: Option<DateTime<Utc>>,
}

impl RequestSummary {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

impl From<&StoreRequest> for RequestSummary {
    fn from(request: &StoreRequest) -> Self {
        Self {
            id: request.id.clone(),
            request_number: format!("REQ-{}", request.num_id),
            request_type: request.request_type,
            status: request.status,
            type_name: request.request_type.label(),
            target_store_name: non_blank(request.target_store.as_ref().map(|s| s.name.as_str()), UNKNOWN_STORE),
            requesting_user_name: non_blank(request.requesting_user.as_ref().map(|u| u.name.as_str()), UNKNOWN_USER),
            requested_date: request.requested_date,
        }
    }
}

fn non_blank(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn requests_table(items_per_page: usize) -> TableConfig {
    TableConfig::new(vec![
        Column::new("requestNumber", "Número", CellRender::Text, 12),
        Column::new("typeName", "Tipo", CellRender::Text, 24),
        Column::new("status", "Estado", CellRender::Text, 14),
        Column::new("targetStoreName", "Tienda destino", CellRender::Text, 20),
        Column::new("requestingUserName", "Solicitado por", CellRender::Text, 18),
        Column::new("requestedDate", "Fecha", CellRender::Date, 12),
    ])
    .with_items_per_page(items_per_page)
}

pub fn requests_filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new("requestNumber", "Buscar número", "Número"),
        FilterConfig::new("typeName", "Buscar tipo", "Tipo"),
        FilterConfig::new("targetStoreName", "Buscar tienda", "Tienda"),
    ]
}

/// Requests mapped for the list, newest requested date first
pub fn request_summaries(requests: &[StoreRequest]) -> Vec<RequestSummary> {
    let mut summaries: Vec<RequestSummary> = requests.iter().map(RequestSummary::from).collect();
    summaries.sort_by(|a, b| b.requested_date.cmp(&a.requested_date));
    summaries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Current,
    Pending,
    Rejected,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: &'static str,
    pub state: StepState,
    /// Only set on completed or current steps
    pub date: Option<DateTime<Utc>>,
}

const STEPS: [RequestStatus; 4] = [
    RequestStatus::Pending,
    RequestStatus::Approved,
    RequestStatus::InProgress,
    RequestStatus::Completed,
];

fn step_state(index: usize, status: RequestStatus) -> StepState {
    match status {
        RequestStatus::Rejected | RequestStatus::Canceled => match index {
            0 => StepState::Completed,
            1 if status == RequestStatus::Rejected => StepState::Rejected,
            1 => StepState::Canceled,
            _ => StepState::Pending,
        },
        _ => {
            let current = STEPS.iter().position(|s| *s == status).unwrap_or(0);
            match index.cmp(&current) {
                std::cmp::Ordering::Less => StepState::Completed,
                std::cmp::Ordering::Equal => StepState::Current,
                std::cmp::Ordering::Greater => StepState::Pending,
            }
        }
    }
}

/// Progress of a request through Pendiente → Aprobada → En Proceso → Completada
pub fn stepper(request: &StoreRequest) -> Vec<Step> {
    STEPS
        .iter()
        .enumerate()
        .map(|(index, status)| {
            let state = step_state(index, request.status);
            let label = match state {
                StepState::Rejected => RequestStatus::Rejected.label(),
                StepState::Canceled => RequestStatus::Canceled.label(),
                _ => status.label(),
            };
            let date = match (index, state) {
                (_, StepState::Pending | StepState::Rejected | StepState::Canceled) => None,
                (0, _) => request.requested_date,
                (1, _) => request.approved_date,
                (3, _) => request.completed_date,
                _ => None,
            };
            Step { label, state, date }
        })
        .collect()
}

/// Σ detail total price; missing totals count as zero
pub fn request_total(request: &StoreRequest) -> Decimal {
    request.details.iter().filter_map(|d| d.total_price).sum()
}

pub async fn load_requests(backend: &dyn PosBackend, store_id: &str) -> Result<Vec<RequestSummary>, ValidationError> {
    let requests = backend
        .list_store_requests(store_id)
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    Ok(request_summaries(&requests))
}

pub async fn load_request(backend: &dyn PosBackend, id: &str) -> Result<StoreRequest, ValidationError> {
    backend
        .get_store_request(id)
        .await
        .map_err(|e| ValidationError::api(ERROR_REQUEST_NOT_FOUND, &e))
}

/// Products and stores the request forms pick from
pub async fn load_request_options(backend: &dyn PosBackend) -> Result<(Vec<Product>, Vec<Store>), ValidationError> {
    let products = backend
        .list_products()
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    let stores = backend
        .list_stores()
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    Ok((products, stores))
}
