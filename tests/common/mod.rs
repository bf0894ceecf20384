//! Fixtures and an in-memory backend shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use novabites::api::{ApiError, ApiResult, BillSource, PosBackend};
use novabites::models::*;
use rust_decimal::Decimal;
use std::sync::Mutex;

pub fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        base_price: dec(price),
        available: true,
        ..Default::default()
    }
}

pub fn store(id: &str, name: &str, store_type: TypeStore) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        store_type,
        available: true,
        ..Default::default()
    }
}

pub fn stores() -> Vec<Store> {
    vec![
        store("central", "Planta Central", TypeStore::Principal),
        store("store-1", "Sede Norte", TypeStore::Normal),
        store("store-2", "Sede Sur", TypeStore::Normal),
    ]
}

pub fn stock(product_id: &str, current_stock: i64) -> StoreProduct {
    StoreProduct {
        id: format!("sp-{}", product_id),
        store_id: "store-1".to_string(),
        product_id: product_id.to_string(),
        current_stock,
        available: true,
        ..Default::default()
    }
}

pub fn user() -> AuthUser {
    AuthUser {
        user_id: "user-1".to_string(),
        name: "Laura Gómez".to_string(),
        username: "laura".to_string(),
        role: Role::User,
        store_id: "store-1".to_string(),
    }
}

/// Order whose details are (product, quantity, line price)
pub fn order(id: &str, created_at: DateTime<Utc>, lines: &[(&Product, i64, i64)]) -> Order {
    Order {
        id: id.to_string(),
        store_id: "store-1".to_string(),
        status: StatusOrder::Completed,
        total_price: lines.iter().map(|(_, _, price)| dec(*price)).sum(),
        details: lines
            .iter()
            .map(|(p, quantity, price)| DetailOrder {
                product_id: Some(p.id.clone()),
                quantity: *quantity,
                price: dec(*price),
                product: Some((*p).clone()),
                ..Default::default()
            })
            .collect(),
        created_at,
        ..Default::default()
    }
}

pub fn expense(id: &str, amount: i64) -> DailyExpense {
    DailyExpense {
        id: id.to_string(),
        store_id: "store-1".to_string(),
        description: format!("Gasto {}", id),
        amount: dec(amount),
        ..Default::default()
    }
}

/// Unsigned JWT carrying the given claims
pub fn token_with(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

pub fn token_expiring_at(exp: i64) -> String {
    token_with(serde_json::json!({
        "userId": "user-1",
        "name": "Laura Gómez",
        "username": "laura",
        "role": "USER",
        "storeId": "store-1",
        "exp": exp,
    }))
}

pub fn valid_token() -> String {
    token_expiring_at(Utc::now().timestamp() + 3600)
}

/// In-memory backend recording what the workflows send
#[derive(Default)]
pub struct FakeBackend {
    pub products: Vec<Product>,
    pub categories: Vec<CategoryProduct>,
    pub store_products: Vec<StoreProduct>,
    pub stores: Vec<Store>,
    pub orders: Vec<Order>,
    pub custom_orders: Vec<CustomOrder>,
    pub requests: Vec<StoreRequest>,
    pub expenses: Mutex<Vec<DailyExpense>>,
    pub closings_count: u32,
    pub last_closing: Option<LastClosing>,
    pub bill: Option<Bill>,
    pub pdf: Vec<u8>,

    /// Every call answers 401
    pub unauthorized: bool,
    pub fail_store_request: bool,
    pub fail_expense_delete: bool,

    pub token: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
    pub created_orders: Mutex<Vec<NewOrder>>,
    pub created_custom_orders: Mutex<Vec<NewCustomOrder>>,
    pub created_requests: Mutex<Vec<NewStoreRequest>>,
    pub created_expenses: Mutex<Vec<NewDailyExpense>>,
    pub created_closings: Mutex<Vec<NewCashClosing>>,
    pub deleted_expenses: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            stores: stores(),
            ..Default::default()
        }
    }

    fn record(&self, call: &str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.unauthorized {
            Err(ApiError::Unauthorized)
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn server_error() -> ApiError {
        ApiError::Http {
            status: 500,
            message: "Internal server error".to_string(),
        }
    }
}

#[async_trait]
impl PosBackend for FakeBackend {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        self.record("login")?;
        if username == "laura" && password == "secreto" {
            Ok(valid_token())
        } else {
            Err(ApiError::Http {
                status: 401,
                message: "Credenciales inválidas".to_string(),
            })
        }
    }

    async fn request_password_reset(&self, _email: &str, _app_url: &str) -> ApiResult<()> {
        self.record("request_password_reset")
    }

    async fn reset_password(&self, _token: &str, _new_password: &str) -> ApiResult<()> {
        self.record("reset_password")
    }

    async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        self.record("get_user")?;
        Ok(User {
            id: user_id.to_string(),
            ..Default::default()
        })
    }

    async fn list_stores(&self) -> ApiResult<Vec<Store>> {
        self.record("list_stores")?;
        Ok(self.stores.clone())
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.record("list_products")?;
        Ok(self.products.clone())
    }

    async fn list_categories(&self) -> ApiResult<Vec<CategoryProduct>> {
        self.record("list_categories")?;
        Ok(self.categories.clone())
    }

    async fn list_store_products(&self, _store_id: &str) -> ApiResult<Vec<StoreProduct>> {
        self.record("list_store_products")?;
        Ok(self.store_products.clone())
    }

    async fn create_order(&self, order: &NewOrder) -> ApiResult<Order> {
        self.record("create_order")?;
        self.created_orders.lock().unwrap().push(order.clone());
        Ok(Order {
            id: "order-new".to_string(),
            num_id: 101,
            total_price: order.total_price,
            payment_method: order.payment_method.clone(),
            ..Default::default()
        })
    }

    async fn list_orders(&self, _store_id: &str, _date: Option<NaiveDate>) -> ApiResult<Vec<Order>> {
        self.record("list_orders")?;
        Ok(self.orders.clone())
    }

    async fn list_custom_orders(&self, _store_id: Option<&str>) -> ApiResult<Vec<CustomOrder>> {
        self.record("list_custom_orders")?;
        Ok(self.custom_orders.clone())
    }

    async fn create_custom_order(&self, order: &NewCustomOrder) -> ApiResult<CustomOrder> {
        self.record("create_custom_order")?;
        self.created_custom_orders.lock().unwrap().push(order.clone());
        Ok(CustomOrder {
            id: "custom-new".to_string(),
            num_id: 7,
            total_price: order.total_price,
            deposit_amount: order.deposit_amount,
            remaining_amount: order.remaining_amount,
            status: order.status,
            ..Default::default()
        })
    }

    async fn update_custom_order_status(&self, id: &str, status: StatusOrder) -> ApiResult<CustomOrder> {
        self.record("update_custom_order_status")?;
        Ok(CustomOrder {
            id: id.to_string(),
            status,
            ..Default::default()
        })
    }

    async fn get_bill(&self, source: BillSource, order_id: &str) -> ApiResult<Bill> {
        self.record(match source {
            BillSource::Order => "bill_for_order",
            BillSource::CustomOrder => "bill_for_custom_order",
        })?;
        self.bill.clone().ok_or_else(|| ApiError::Http {
            status: 404,
            message: format!("Bill for {} not found", order_id),
        })
    }

    async fn generate_bill_pdf(&self, _bill_id: &str) -> ApiResult<Vec<u8>> {
        self.record("generate_bill_pdf")?;
        Ok(self.pdf.clone())
    }

    async fn create_store_request(&self, request: &NewStoreRequest) -> ApiResult<StoreRequest> {
        self.record("create_store_request")?;
        if self.fail_store_request {
            return Err(Self::server_error());
        }
        self.created_requests.lock().unwrap().push(request.clone());
        Ok(StoreRequest {
            id: format!("req-{}", self.created_requests.lock().unwrap().len()),
            request_type: request.request_type,
            status: request.status,
            ..Default::default()
        })
    }

    async fn list_store_requests(&self, _store_id: &str) -> ApiResult<Vec<StoreRequest>> {
        self.record("list_store_requests")?;
        Ok(self.requests.clone())
    }

    async fn get_store_request(&self, id: &str) -> ApiResult<StoreRequest> {
        self.record("get_store_request")?;
        self.requests
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: "Solicitud no encontrada".to_string(),
            })
    }

    async fn list_daily_expenses(&self, _store_id: &str, _date: NaiveDate) -> ApiResult<Vec<DailyExpense>> {
        self.record("list_daily_expenses")?;
        Ok(self.expenses.lock().unwrap().clone())
    }

    async fn create_daily_expense(&self, expense: &NewDailyExpense) -> ApiResult<DailyExpense> {
        self.record("create_daily_expense")?;
        let mut created = self.created_expenses.lock().unwrap();
        created.push(expense.clone());
        Ok(DailyExpense {
            id: format!("exp-{}", created.len()),
            store_id: expense.store_id.clone(),
            user_id: expense.user_id.clone(),
            category: expense.category,
            description: expense.description.clone(),
            amount: expense.amount.parse().unwrap_or_default(),
            expense_date: Some(expense.expense_date),
            ..Default::default()
        })
    }

    async fn delete_daily_expense(&self, id: &str) -> ApiResult<()> {
        self.record("delete_daily_expense")?;
        if self.fail_expense_delete {
            return Err(Self::server_error());
        }
        self.deleted_expenses.lock().unwrap().push(id.to_string());
        self.expenses.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn count_closings(&self, _store_id: &str, _date: NaiveDate) -> ApiResult<u32> {
        self.record("count_closings")?;
        Ok(self.closings_count)
    }

    async fn last_closing_of_day(&self, _store_id: &str, _date: NaiveDate) -> ApiResult<Option<LastClosing>> {
        self.record("last_closing_of_day")?;
        Ok(self.last_closing.clone())
    }

    async fn create_cash_closing(&self, closing: &NewCashClosing) -> ApiResult<CashClosing> {
        self.record("create_cash_closing")?;
        self.created_closings.lock().unwrap().push(closing.clone());
        Ok(CashClosing {
            id: "closing-1".to_string(),
            num_id: 12,
            store_id: closing.store_id.clone(),
            description: closing.description.clone(),
            total_orders: closing.total_orders as i64,
            total_revenue: closing.total_revenue,
            total_expenses: closing.total_expenses,
            net_profit: closing.net_profit,
            store_request_id: Some(closing.store_request_id.clone()),
            ..Default::default()
        })
    }
}
