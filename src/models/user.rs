use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Role, TypeContract, TypeId};
use super::store::Store;

/// Employee account as returned by `/api/user/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub num_id: i64,
    pub type_id: Option<TypeId>,
    pub doc_id: String,
    pub status: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub store_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub credentials: Option<Credentials>,
    pub user_details: Option<UserDetails>,
    pub store: Option<Box<Store>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credentials {
    pub id: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDetails {
    pub id: String,
    pub user_id: String,
    pub address: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub img_url: Option<String>,
    pub position: Option<String>,
    pub type_contract: Option<TypeContract>,
}

/// Authenticated user as carried by the session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub store_id: String,
}
