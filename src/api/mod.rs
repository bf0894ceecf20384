//! Remote API access.
//!
//! [`PosBackend`] is the seam between the client-side workflows and the REST
//! API: [`HttpBackend`] talks to the real server, tests plug in in-memory
//! implementations.

use crate::constants::ERROR_SESSION_EXPIRED;
use crate::models::{
    Bill, CashClosing, CategoryProduct, CustomOrder, DailyExpense, LastClosing, NewCashClosing, NewCustomOrder,
    NewDailyExpense, NewOrder, NewStoreRequest, Order, Product, StatusOrder, Store, StoreProduct, StoreRequest, User,
};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod backend;
pub mod http;

pub use backend::HttpBackend;
pub use http::HttpClient;

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401; the session must be dropped
    #[error("{}", ERROR_SESSION_EXPIRED)]
    Unauthorized,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Error de red: {0}")]
    Network(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Which kind of sale a bill belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillSource {
    Order,
    CustomOrder,
}

/// Operations the POS front-end performs against the backend.
#[async_trait]
pub trait PosBackend: Send + Sync {
    /// Replace the bearer token sent with every request
    fn set_token(&self, token: Option<String>);

    // Auth
    async fn login(&self, username: &str, password: &str) -> ApiResult<String>;
    async fn request_password_reset(&self, email: &str, app_url: &str) -> ApiResult<()>;
    async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()>;

    // Users and stores
    async fn get_user(&self, user_id: &str) -> ApiResult<User>;
    async fn list_stores(&self) -> ApiResult<Vec<Store>>;

    // Catalog
    async fn list_products(&self) -> ApiResult<Vec<Product>>;
    async fn list_categories(&self) -> ApiResult<Vec<CategoryProduct>>;
    async fn list_store_products(&self, store_id: &str) -> ApiResult<Vec<StoreProduct>>;

    // Sales
    async fn create_order(&self, order: &NewOrder) -> ApiResult<Order>;
    async fn list_orders(&self, store_id: &str, date: Option<NaiveDate>) -> ApiResult<Vec<Order>>;

    // Custom orders
    async fn list_custom_orders(&self, store_id: Option<&str>) -> ApiResult<Vec<CustomOrder>>;
    async fn create_custom_order(&self, order: &NewCustomOrder) -> ApiResult<CustomOrder>;
    async fn update_custom_order_status(&self, id: &str, status: StatusOrder) -> ApiResult<CustomOrder>;

    // Bills
    async fn get_bill(&self, source: BillSource, order_id: &str) -> ApiResult<Bill>;

    async fn bill_for_order(&self, order_id: &str) -> ApiResult<Bill> {
        self.get_bill(BillSource::Order, order_id).await
    }

    async fn bill_for_custom_order(&self, custom_order_id: &str) -> ApiResult<Bill> {
        self.get_bill(BillSource::CustomOrder, custom_order_id).await
    }

    async fn generate_bill_pdf(&self, bill_id: &str) -> ApiResult<Vec<u8>>;

    // Store requests
    async fn create_store_request(&self, request: &NewStoreRequest) -> ApiResult<StoreRequest>;
    async fn list_store_requests(&self, store_id: &str) -> ApiResult<Vec<StoreRequest>>;
    async fn get_store_request(&self, id: &str) -> ApiResult<StoreRequest>;

    // Expenses and closings
    async fn list_daily_expenses(&self, store_id: &str, date: NaiveDate) -> ApiResult<Vec<DailyExpense>>;
    async fn create_daily_expense(&self, expense: &NewDailyExpense) -> ApiResult<DailyExpense>;
    async fn delete_daily_expense(&self, id: &str) -> ApiResult<()>;
    async fn count_closings(&self, store_id: &str, date: NaiveDate) -> ApiResult<u32>;
    async fn last_closing_of_day(&self, store_id: &str, date: NaiveDate) -> ApiResult<Option<LastClosing>>;
    async fn create_cash_closing(&self, closing: &NewCashClosing) -> ApiResult<CashClosing>;
}
