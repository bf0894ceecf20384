//! Read-only view of the signed-in employee.

use crate::api::PosBackend;
use crate::constants::*;
use crate::models::User;
use crate::notify::{Toast, ValidationError};
use crate::utils::datetime::{format_date_long, local_date};
use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub title: &'static str,
    pub fields: Vec<ProfileField>,
}

fn field(label: &'static str, value: impl Into<String>) -> ProfileField {
    ProfileField {
        label,
        value: value.into(),
    }
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// First letter upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().collect::<String>() + &rest
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

fn date_or_na(date: Option<&DateTime<Utc>>, tz: FixedOffset) -> String {
    date.map(|d| format_date_long(local_date(d, tz)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Profile page content; missing values read "N/A"
pub fn profile_sections(user: &User, tz: FixedOffset) -> Vec<ProfileSection> {
    let details = user.user_details.as_ref();
    let document = match (user.type_id, user.doc_id.trim()) {
        (_, "") => NOT_AVAILABLE.to_string(),
        (Some(kind), doc) => format!("{} {}", kind, doc),
        (None, doc) => doc.to_string(),
    };

    vec![
        ProfileSection {
            title: "Información del Usuario",
            fields: vec![
                field("Nombre Completo", or_na(Some(&user.name))),
                field("Correo Electrónico", or_na(Some(&user.email))),
                field("Teléfono", or_na(user.phone.as_deref())),
                field("Documento", document),
                field(
                    "Fecha de Nacimiento",
                    date_or_na(details.and_then(|d| d.birth_date.as_ref()), tz),
                ),
            ],
        },
        ProfileSection {
            title: "Información Laboral",
            fields: vec![
                field("Rol", user.role.label()),
                field("Tienda", or_na(user.store.as_ref().map(|s| s.name.as_str()))),
                field("Estado", or_na(Some(&user.status))),
                field(
                    "Cargo",
                    details
                        .and_then(|d| d.position.as_deref())
                        .map(capitalize)
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
                field(
                    "Tipo de Contrato",
                    details
                        .and_then(|d| d.type_contract)
                        .map(|c| c.label().to_string())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
            ],
        },
        ProfileSection {
            title: "Ubicación",
            fields: vec![
                field("Ciudad", or_na(details.and_then(|d| d.city.as_deref()))),
                field("Dirección", or_na(details.and_then(|d| d.address.as_deref()))),
            ],
        },
        ProfileSection {
            title: "Información del Sistema",
            fields: vec![
                field("Fecha de Registro", date_or_na(Some(&user.created_at), tz)),
                field("Última Actualización", date_or_na(Some(&user.updated_at), tz)),
            ],
        },
    ]
}

pub fn password_change_toast() -> Toast {
    Toast::info(INFO_PASSWORD_CHANGE, INFO_PASSWORD_CHANGE_DESC)
}

pub async fn load_profile(backend: &dyn PosBackend, user_id: &str) -> Result<User, ValidationError> {
    backend
        .get_user(user_id)
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))
}
