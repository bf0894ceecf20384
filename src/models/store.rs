use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{TypeStore, UnitType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub num_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub store_type: TypeStore,
    pub manager_id: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Store {
    pub fn is_principal(&self) -> bool {
        self.store_type == TypeStore::Principal
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub num_id: i64,
    pub name: String,
    pub central_stock: i64,
    pub base_price: Decimal,
    pub supplier_id: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub unit: Option<UnitType>,
    pub min_stock: Option<i64>,
    pub available: bool,
    pub category: Option<CategoryProduct>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryProduct {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<SubcategoryProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubcategoryProduct {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
}

/// Per-store stock record for a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreProduct {
    pub id: String,
    pub num_id: i64,
    pub store_id: String,
    pub product_id: String,
    pub allocated_stock: i64,
    pub current_stock: i64,
    pub price: Option<Decimal>,
    pub min_stock: Option<i64>,
    pub available: bool,
    pub status: Option<String>,
    pub last_allocation: Option<DateTime<Utc>>,
    pub product: Option<Product>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
