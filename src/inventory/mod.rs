//! Store inventory table and stock requests.

pub mod requests;

pub use requests::{
    build_request, load_request, load_request_options, load_requests, principal_store, relocation_targets,
    request_summaries, request_total, requests_filters, requests_table, stepper, submit_request, RequestKind,
    RequestRow, RequestSummary, RequestTable, Step, StepState,
};

use crate::api::PosBackend;
use crate::constants::ERROR_REPORT_LOAD;
use crate::filter::FilterConfig;
use crate::models::StoreProduct;
use crate::notify::ValidationError;
use crate::table::{CellRender, Column, TableConfig};

pub fn inventory_columns() -> Vec<Column> {
    vec![
        Column::new("product.name", "Producto", CellRender::Text, 28),
        Column::new("product.category.name", "Categoría", CellRender::Text, 18),
        Column::new("currentStock", "Stock", CellRender::Text, 10),
        Column::new("product.basePrice", "Precio", CellRender::Money, 14),
        Column::new("status", "Estado", CellRender::Text, 14),
        Column::new("lastAllocation", "Última asignación", CellRender::Date, 16),
    ]
}

pub fn inventory_table(items_per_page: usize) -> TableConfig {
    TableConfig::new(inventory_columns()).with_items_per_page(items_per_page)
}

pub fn inventory_filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new("product.name", "Buscar producto", "Producto"),
        FilterConfig::new("product.category.name", "Buscar categoría", "Categoría"),
        FilterConfig::new("status", "Buscar estado", "Estado"),
    ]
}

pub async fn load_inventory(backend: &dyn PosBackend, store_id: &str) -> Result<Vec<StoreProduct>, ValidationError> {
    let items = backend
        .list_store_products(store_id)
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
    log::debug!("Loaded {} inventory rows for store {}", items.len(), store_id);
    Ok(items)
}
