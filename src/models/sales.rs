use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{StatusOrder, TypeId};
use super::store::{Product, Store};
use super::user::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub num_id: i64,
    pub type_id: TypeId,
    pub doc_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Point-of-sale order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub num_id: i64,
    pub status: StatusOrder,
    pub total_price: Decimal,
    pub payment_method: String,
    pub amount_received: Option<Decimal>,
    pub change: Option<Decimal>,
    pub client_id: Option<String>,
    pub store_id: String,
    pub user_id: String,
    pub client: Option<Client>,
    pub store: Option<Box<Store>>,
    pub user: Option<Box<User>>,
    pub details: Vec<DetailOrder>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailOrder {
    pub id: String,
    pub order_id: String,
    pub product_id: Option<String>,
    pub quantity: i64,
    pub price: Decimal,
    pub product: Option<Product>,
}

/// Made-to-order request with a deposit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOrder {
    pub id: String,
    pub num_id: i64,
    pub client_id: Option<String>,
    pub store_id: String,
    pub user_id: String,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    pub total_price: Decimal,
    pub status: StatusOrder,
    pub available: bool,
    pub client: Option<Client>,
    pub details: Vec<DetailCustomOrder>,
    pub products: Vec<CustomOrderProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cake details inside a custom order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailCustomOrder {
    pub id: String,
    pub custom_order_id: String,
    pub image_url: String,
    pub pounds: Decimal,
    pub tiers: u32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOrderProduct {
    pub custom_order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub num_id: i64,
    pub bill_number: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub total_price: Decimal,
    pub user_id: String,
    pub store_id: String,
    pub order_id: Option<String>,
    pub custom_order_id: Option<String>,
    pub client_name: Option<String>,
    pub client_doc_type: Option<String>,
    pub client_doc_id: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub order: Option<Box<Order>>,
    pub custom_order: Option<Box<CustomOrder>>,
    pub details: Vec<DetailBill>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailBill {
    pub id: String,
    pub bill_id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub price: Decimal,
    pub unit_price: Option<Decimal>,
    pub subtotal: Option<Decimal>,
    pub product: Option<Product>,
}

impl DetailBill {
    /// Product name with the fallbacks the bill view uses
    pub fn display_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .or(self.product_name.as_deref())
            .unwrap_or("Producto")
    }

    pub fn line_total(&self) -> Decimal {
        self.subtotal
            .unwrap_or_else(|| Decimal::from(self.quantity) * self.unit_price.unwrap_or_default())
    }
}

/// Body of `POST /api/order`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub details: Vec<NewDetailOrder>,
    pub total_price: Decimal,
    pub status: StatusOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub store_id: String,
    pub user_id: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_received: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDetailOrder {
    pub product_id: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// Body of `POST /api/custom-order`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomOrder {
    pub store_id: String,
    pub user_id: String,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    pub total_price: Decimal,
    pub status: StatusOrder,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<NewClient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<NewCustomOrderProduct>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<NewCakeDetail>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomOrderProduct {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCakeDetail {
    pub pounds: Decimal,
    pub tiers: u32,
    pub price: Decimal,
    pub image_url: String,
}
