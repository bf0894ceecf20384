mod common;

use chrono::{TimeZone, Utc};
use common::*;
use novabites::api::ApiError;
use novabites::auth::*;
use novabites::constants::*;
use novabites::models::{Store, TypeContract, TypeId, User, UserDetails};
use novabites::profile::{load_profile, password_change_toast, profile_sections};
use novabites::utils::datetime::default_timezone;

fn form(username: &str, password: &str) -> SignInForm {
    SignInForm {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn reset(token: &str, new_password: &str, confirm_password: &str) -> ResetPasswordForm {
    ResetPasswordForm {
        token: token.to_string(),
        new_password: new_password.to_string(),
        confirm_password: confirm_password.to_string(),
    }
}

#[test]
fn test_sign_in_form_requires_both_fields() {
    assert_eq!(form("  ", "x").validate().unwrap_err().title, ERROR_LOGIN_FIELDS);
    assert_eq!(form("laura", "").validate().unwrap_err().title, ERROR_LOGIN_FIELDS);
    assert!(form("laura", "secreto").validate().is_ok());
}

#[tokio::test]
async fn test_sign_in_returns_token() {
    let backend = FakeBackend::new();
    let token = sign_in(&backend, &form(" laura ", "secreto")).await.unwrap();
    assert!(novabites::session::decode_token(&token).is_ok());
}

#[tokio::test]
async fn test_sign_in_surfaces_server_message() {
    let backend = FakeBackend::new();
    let err = sign_in(&backend, &form("laura", "mala")).await.unwrap_err();
    assert_eq!(err.title, "Credenciales inválidas");
    assert_eq!(err.description, ERROR_LOGIN_DESC);

    let empty = sign_in(&backend, &form("", "")).await.unwrap_err();
    assert_eq!(empty.title, ERROR_LOGIN_FIELDS);
    assert_eq!(backend.calls(), vec!["login"]);
}

#[tokio::test]
async fn test_sign_in_generic_error() {
    let backend = FakeBackend {
        unauthorized: true,
        ..FakeBackend::new()
    };
    let err = sign_in(&backend, &form("laura", "secreto")).await.unwrap_err();
    assert_eq!(err.title, ERROR_LOGIN);
}

#[tokio::test]
async fn test_forgot_password() {
    let backend = FakeBackend::new();
    let err = request_password_reset(&backend, "   ", "http://localhost").await.unwrap_err();
    assert_eq!(err.title, ERROR_EMAIL_REQUIRED);
    assert!(backend.calls().is_empty());

    request_password_reset(&backend, "laura@novabites.co", "http://localhost")
        .await
        .unwrap();
    assert_eq!(backend.calls(), vec!["request_password_reset"]);
}

#[test]
fn test_reset_form_validation_order() {
    assert_eq!(reset("", "", "").validate().unwrap_err().title, ERROR_TOKEN_INVALID);
    assert_eq!(reset("tok", "", "abcdef").validate().unwrap_err().title, ERROR_ALL_FIELDS);
    assert_eq!(reset("tok", "abc", "abd").validate().unwrap_err().title, ERROR_PASSWORD_SHORT);
    assert_eq!(
        reset("tok", "abcdef", "abcdeg").validate().unwrap_err().title,
        ERROR_PASSWORD_MISMATCH
    );
    // Length counts characters, not bytes
    assert!(reset("tok", "ñañaña", "ñañaña").validate().is_ok());
}

#[tokio::test]
async fn test_reset_password_calls_backend() {
    let backend = FakeBackend::new();
    reset_password(&backend, &reset("tok", "nueva123", "nueva123")).await.unwrap();
    assert_eq!(backend.calls(), vec!["reset_password"]);

    let failing = FakeBackend {
        unauthorized: true,
        ..FakeBackend::new()
    };
    let err = reset_password(&failing, &reset("tok", "nueva123", "nueva123"))
        .await
        .unwrap_err();
    assert_eq!(err.title, ERROR_PASSWORD_RESET);
    assert_eq!(err.description, ApiError::Unauthorized.to_string());
}

#[test]
fn test_profile_sections_fill_missing_values() {
    let tz = default_timezone();
    let user = User {
        name: "Laura Gómez".to_string(),
        email: "laura@novabites.co".to_string(),
        type_id: Some(TypeId::CC),
        doc_id: "1020304050".to_string(),
        status: "ACTIVE".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 2, 10, 15, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 5, 15, 0, 0).unwrap(),
        store: Some(Box::new(Store {
            name: "Sede Norte".to_string(),
            ..Default::default()
        })),
        user_details: Some(UserDetails {
            position: Some("PANADERA".to_string()),
            type_contract: Some(TypeContract::FixedTerm),
            ..Default::default()
        }),
        ..Default::default()
    };

    let sections = profile_sections(&user, tz);
    assert_eq!(sections.len(), 4);

    let value = |section: usize, label: &str| {
        sections[section]
            .fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.clone())
            .unwrap()
    };
    assert_eq!(value(0, "Documento"), "CC 1020304050");
    assert_eq!(value(0, "Teléfono"), NOT_AVAILABLE);
    assert_eq!(value(0, "Fecha de Nacimiento"), NOT_AVAILABLE);
    assert_eq!(value(1, "Rol"), "Usuario");
    assert_eq!(value(1, "Tienda"), "Sede Norte");
    assert_eq!(value(1, "Cargo"), "Panadera");
    assert_eq!(value(1, "Tipo de Contrato"), "Termino Fijo");
    assert_eq!(value(2, "Ciudad"), NOT_AVAILABLE);
    assert_eq!(value(3, "Fecha de Registro"), "10 de febrero de 2024");
}

#[tokio::test]
async fn test_load_profile() {
    let backend = FakeBackend::new();
    let user = load_profile(&backend, "user-1").await.unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(password_change_toast().title, INFO_PASSWORD_CHANGE);
}
