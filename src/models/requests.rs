use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{RequestStatus, RequestType, ReturnReason};
use super::store::{Product, Store};
use super::user::User;

/// Stock movement request between stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreRequest {
    pub id: String,
    pub num_id: i64,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub requesting_store_id: String,
    pub requesting_user_id: String,
    pub target_store_id: String,
    pub approved_by_user_id: Option<String>,
    pub requested_date: Option<DateTime<Utc>>,
    pub approved_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub requesting_store: Option<Box<Store>>,
    pub target_store: Option<Box<Store>>,
    pub requesting_user: Option<Box<User>>,
    pub details: Vec<StoreRequestDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreRequestDetail {
    pub id: String,
    pub request_id: String,
    pub product_id: String,
    pub requested_quantity: i64,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub return_reason: Option<ReturnReason>,
    pub product: Option<Product>,
}

/// Body of `POST /api/store-request`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreRequest {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub requesting_store_id: String,
    pub requesting_user_id: String,
    pub target_store_id: String,
    pub requested_date: DateTime<Utc>,
    pub details: Vec<NewStoreRequestDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreRequestDetail {
    pub product_id: String,
    pub requested_quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_reason: Option<ReturnReason>,
}
