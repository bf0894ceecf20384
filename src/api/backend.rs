//! [`PosBackend`] implementation over HTTP.

use super::{ApiError, ApiResult, BillSource, HttpClient, PosBackend};
use crate::config::ApiConfig;
use crate::constants::*;
use crate::models::{
    Bill, CashClosing, CategoryProduct, ClosingCount, CustomOrder, DailyExpense, LastClosing, NewCashClosing,
    NewCustomOrder, NewDailyExpense, NewOrder, NewStoreRequest, Order, Product, StatusOrder, Store, StoreProduct,
    StoreRequest, User,
};
use crate::utils::datetime::format_ymd;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResetRequest<'a> {
    email: &'a str,
    app_url: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordReset<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: StatusOrder,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBill<'a> {
    bill_id: &'a str,
}

/// Backend that talks to the NovaBites REST API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: HttpClient,
}

impl HttpBackend {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build from the `[api]` config section, honoring the environment override
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = config.effective_base_url();
        log::info!("Using API at {}", base_url);
        let client = HttpClient::new(base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

/// Extract the token from a login response.
///
/// The server answers with the bare token, a JSON string, or an object
/// carrying `access_token`/`token`.
pub fn parse_login_token(body: &str) -> ApiResult<String> {
    let trimmed = body.trim();
    let token = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(token)) => token,
        Ok(serde_json::Value::Object(map)) => map
            .get("access_token")
            .or_else(|| map.get("token"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Decode("login response without token".to_string()))?,
        _ => trimmed.to_string(),
    };

    if token.is_empty() {
        return Err(ApiError::Decode("empty login token".to_string()));
    }
    Ok(token)
}

#[async_trait]
impl PosBackend for HttpBackend {
    fn set_token(&self, token: Option<String>) {
        self.client.set_token(token);
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let body = self
            .client
            .post_credentials(EP_LOGIN, &LoginRequest { username, password })
            .await?;
        parse_login_token(&body)
    }

    async fn request_password_reset(&self, email: &str, app_url: &str) -> ApiResult<()> {
        self.client
            .post_text(EP_PASSWORD_RESET_REQUEST, &PasswordResetRequest { email, app_url })
            .await?;
        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        self.client
            .post_text(EP_PASSWORD_RESET, &PasswordReset { token, new_password })
            .await?;
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        self.client.get(&format!("{}/{}", EP_USER, user_id)).await
    }

    async fn list_stores(&self) -> ApiResult<Vec<Store>> {
        self.client.get(EP_STORE).await
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.client.get(EP_PRODUCT).await
    }

    async fn list_categories(&self) -> ApiResult<Vec<CategoryProduct>> {
        self.client.get(EP_CATEGORY).await
    }

    async fn list_store_products(&self, store_id: &str) -> ApiResult<Vec<StoreProduct>> {
        self.client
            .get(&format!("{}/{}", EP_STORE_PRODUCT_BY_STORE, store_id))
            .await
    }

    async fn create_order(&self, order: &NewOrder) -> ApiResult<Order> {
        self.client.post(EP_ORDER, order).await
    }

    async fn list_orders(&self, store_id: &str, date: Option<NaiveDate>) -> ApiResult<Vec<Order>> {
        let mut query = vec![("storeId", store_id.to_string())];
        if let Some(date) = date {
            query.push(("date", format_ymd(date)));
        }
        self.client.get_with_query(EP_ORDER, &query).await
    }

    async fn list_custom_orders(&self, store_id: Option<&str>) -> ApiResult<Vec<CustomOrder>> {
        match store_id {
            Some(store_id) => {
                self.client
                    .get_with_query(EP_CUSTOM_ORDER, &[("storeId", store_id.to_string())])
                    .await
            }
            None => self.client.get(EP_CUSTOM_ORDER).await,
        }
    }

    async fn create_custom_order(&self, order: &NewCustomOrder) -> ApiResult<CustomOrder> {
        self.client.post(EP_CUSTOM_ORDER, order).await
    }

    async fn update_custom_order_status(&self, id: &str, status: StatusOrder) -> ApiResult<CustomOrder> {
        self.client
            .patch(&format!("{}/{}", EP_CUSTOM_ORDER, id), &StatusUpdate { status })
            .await
    }

    async fn get_bill(&self, source: BillSource, order_id: &str) -> ApiResult<Bill> {
        let base = match source {
            BillSource::Order => EP_BILL_ORDER,
            BillSource::CustomOrder => EP_BILL_CUSTOM_ORDER,
        };
        self.client.get(&format!("{}/{}", base, order_id)).await
    }

    async fn generate_bill_pdf(&self, bill_id: &str) -> ApiResult<Vec<u8>> {
        self.client
            .post_bytes(EP_BILL_GENERATE, &GenerateBill { bill_id })
            .await
    }

    async fn create_store_request(&self, request: &NewStoreRequest) -> ApiResult<StoreRequest> {
        self.client.post(EP_STORE_REQUEST, request).await
    }

    async fn list_store_requests(&self, store_id: &str) -> ApiResult<Vec<StoreRequest>> {
        self.client
            .get(&format!("{}/{}", EP_STORE_REQUEST_BY_STORE, store_id))
            .await
    }

    async fn get_store_request(&self, id: &str) -> ApiResult<StoreRequest> {
        self.client.get(&format!("{}/{}", EP_STORE_REQUEST, id)).await
    }

    async fn list_daily_expenses(&self, store_id: &str, date: NaiveDate) -> ApiResult<Vec<DailyExpense>> {
        let query = [("storeId", store_id.to_string()), ("date", format_ymd(date))];
        self.client.get_with_query(EP_DAILY_EXPENSE, &query).await
    }

    async fn create_daily_expense(&self, expense: &NewDailyExpense) -> ApiResult<DailyExpense> {
        self.client.post(EP_DAILY_EXPENSE, expense).await
    }

    async fn delete_daily_expense(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("{}/{}", EP_DAILY_EXPENSE, id)).await
    }

    async fn count_closings(&self, store_id: &str, date: NaiveDate) -> ApiResult<u32> {
        let count: ClosingCount = self
            .client
            .get(&format!("{}/{}/{}", EP_CASH_CLOSING_COUNT, store_id, format_ymd(date)))
            .await?;
        Ok(count.count)
    }

    async fn last_closing_of_day(&self, store_id: &str, date: NaiveDate) -> ApiResult<Option<LastClosing>> {
        self.client
            .get(&format!("{}/{}/{}", EP_CASH_CLOSING_LAST, store_id, format_ymd(date)))
            .await
    }

    async fn create_cash_closing(&self, closing: &NewCashClosing) -> ApiResult<CashClosing> {
        self.client.post(EP_CASH_CLOSING, closing).await
    }
}
