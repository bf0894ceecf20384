//! Bills list, bill lookup and PDF download.

use crate::api::{BillSource, PosBackend};
use crate::constants::*;
use crate::filter::FilterConfig;
use crate::models::{Bill, CustomOrder, Order, TypeId};
use crate::notify::ValidationError;
use crate::table::{CellRender, Column, TableConfig};
use crate::utils::datetime::format_ymd;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One row of the bills list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillEntry {
    pub id: String,
    pub bill_number: String,
    pub total_price: Decimal,
    pub client_name: String,
    pub client_doc_type: Option<TypeId>,
    pub client_doc_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub source: BillSource,
}

impl BillEntry {
    pub fn kind_label(&self) -> &'static str {
        match self.source {
            BillSource::Order => "Orden",
            BillSource::CustomOrder => "Orden Personalizado",
        }
    }
}

impl From<&Order> for BillEntry {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            bill_number: format!("ORD-{}", order.num_id),
            total_price: order.total_price,
            client_name: client_name(order.client.as_ref().map(|c| c.name.as_str())),
            client_doc_type: order.client.as_ref().map(|c| c.type_id),
            client_doc_id: order.client.as_ref().map(|c| c.doc_id.clone()),
            created_at: order.created_at,
            source: BillSource::Order,
        }
    }
}

impl From<&CustomOrder> for BillEntry {
    fn from(order: &CustomOrder) -> Self {
        Self {
            id: order.id.clone(),
            bill_number: format!("CUST-{}", order.num_id),
            total_price: order.total_price,
            client_name: client_name(order.client.as_ref().map(|c| c.name.as_str())),
            client_doc_type: order.client.as_ref().map(|c| c.type_id),
            client_doc_id: order.client.as_ref().map(|c| c.doc_id.clone()),
            created_at: order.created_at,
            source: BillSource::CustomOrder,
        }
    }
}

fn client_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => UNNAMED_CLIENT.to_string(),
    }
}

pub fn bills_table(items_per_page: usize) -> TableConfig {
    TableConfig::new(vec![
        Column::new("billNumber", "Factura", CellRender::Text, 14),
        Column::new("clientName", "Cliente", CellRender::Text, 30),
        Column::new("clientDocId", "Documento", CellRender::Text, 18),
        Column::new("totalPrice", "Total", CellRender::Money, 18),
        Column::new("createdAt", "Fecha", CellRender::Date, 16),
    ])
    .with_items_per_page(items_per_page)
}

pub fn bills_filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new("billNumber", "Buscar factura", "Factura"),
        FilterConfig::new("clientName", "Buscar cliente", "Cliente"),
    ]
}

/// Orders and custom orders merged, newest first
pub fn bill_entries(orders: &[Order], custom_orders: &[CustomOrder]) -> Vec<BillEntry> {
    let mut entries: Vec<BillEntry> = orders
        .iter()
        .map(BillEntry::from)
        .chain(custom_orders.iter().map(BillEntry::from))
        .collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

/// `factura_{billNumber|id}_{YYYY-MM-DD}.pdf`; path separators in the
/// number become `-` so the file stays in the download directory
pub fn pdf_filename(bill: &Bill, date: NaiveDate) -> String {
    let number = bill
        .bill_number
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&bill.id)
        .replace(['/', '\\'], "-");
    format!("factura_{}_{}.pdf", number, format_ymd(date))
}

/// Load both lists for the bills screen
pub async fn load_bill_entries(backend: &dyn PosBackend, store_id: &str) -> Result<Vec<BillEntry>, ValidationError> {
    let orders = backend
        .list_orders(store_id, None)
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    let custom_orders = backend
        .list_custom_orders(Some(store_id))
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    Ok(bill_entries(&orders, &custom_orders))
}

pub async fn load_bill(backend: &dyn PosBackend, source: BillSource, id: &str) -> Result<Bill, ValidationError> {
    backend.get_bill(source, id).await.map_err(|e| {
        log::warn!("Bill lookup failed for {:?} {}: {}", source, id, e);
        let mut err = ValidationError::new(ERROR_BILL_NOT_FOUND, ERROR_BILL_NOT_FOUND_DESC);
        err.session_expired = e.is_unauthorized();
        err
    })
}

/// Generate the bill PDF and write it into `directory`
pub async fn download_bill_pdf(
    backend: &dyn PosBackend,
    bill: &Bill,
    directory: &Path,
) -> Result<PathBuf, ValidationError> {
    let bytes = backend.generate_bill_pdf(&bill.id).await.map_err(|e| {
        log::error!("PDF generation failed for bill {}: {}", bill.id, e);
        let mut err = ValidationError::new(ERROR_PDF, ERROR_PDF_DESC);
        err.session_expired = e.is_unauthorized();
        err
    })?;

    let path = directory.join(pdf_filename(bill, Utc::now().date_naive()));
    let write = async {
        tokio::fs::create_dir_all(directory).await?;
        tokio::fs::write(&path, &bytes).await
    };
    write.await.map_err(|e| {
        log::error!("Could not write {}: {}", path.display(), e);
        ValidationError::new(ERROR_PDF, e.to_string())
    })?;

    log::info!("Saved bill PDF to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
