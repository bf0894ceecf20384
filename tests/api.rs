use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use novabites::api::backend::parse_login_token;
use novabites::api::http::{body_message, error_message};
use novabites::api::{ApiError, BillSource, HttpBackend, HttpClient, PosBackend};
use novabites::auth::{sign_in, SignInForm};
use novabites::constants::ERROR_LOGIN_DESC;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<String>>>;

const TOKEN: &str = "tok-123";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn login(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        Some("laura") => Json(json!({ "access_token": TOKEN })).into_response(),
        Some("") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": ["username should not be empty", "password is too short"] })),
        )
            .into_response(),
        Some("anonimo") => StatusCode::UNAUTHORIZED.into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Credenciales inválidas" }))).into_response(),
    }
}

async fn stores(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        { "id": "central", "name": "Planta Central", "type": "PRINCIPAL", "available": true },
        { "id": "store-1", "name": "Sede Norte", "type": "NORMAL", "available": true }
    ]))
    .into_response()
}

async fn orders(State(seen): State<Seen>, uri: Uri) -> Json<Value> {
    seen.lock().unwrap().push(uri.to_string());
    Json(json!([{ "id": "o-1", "numId": 1, "totalPrice": "12500", "status": "COMPLETED" }]))
}

async fn products() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Fallo interno" })),
    )
        .into_response()
}

async fn categories() -> Response {
    (StatusCode::NOT_FOUND, "not json").into_response()
}

async fn closing_count() -> Json<Value> {
    Json(json!({ "count": 2 }))
}

async fn last_closing() -> StatusCode {
    StatusCode::OK
}

async fn delete_expense(State(seen): State<Seen>, uri: Uri) -> StatusCode {
    seen.lock().unwrap().push(uri.to_string());
    StatusCode::NO_CONTENT
}

async fn generate_pdf(Json(body): Json<Value>) -> Response {
    if body["billId"] == "bill-9" {
        b"%PDF-1.4".to_vec().into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}

async fn bill() -> Json<Value> {
    Json(json!({ "id": "bill-9", "billNumber": "F-0042", "totalPrice": 8000 }))
}

async fn spawn_server(seen: Seen) -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/store", get(stores))
        .route("/api/order", get(orders))
        .route("/api/product", get(products))
        .route("/api/category-product", get(categories))
        .route("/api/cash-closing/count/{store}/{date}", get(closing_count))
        .route("/api/cash-closing/last-of-day/{store}/{date}", get(last_closing))
        .route("/api/daily-expense/{id}", delete(delete_expense))
        .route("/api/bill/generate", post(generate_pdf))
        .route("/api/bill/custom-order/{id}", get(bill))
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}/", addr)
}

async fn backend() -> (HttpBackend, Seen) {
    let seen: Seen = Arc::default();
    let base_url = spawn_server(seen.clone()).await;
    let client = HttpClient::new(base_url, Duration::from_secs(5)).unwrap();
    (HttpBackend::new(client), seen)
}

#[test]
fn test_parse_login_token_shapes() {
    assert_eq!(parse_login_token("abc.def.ghi").unwrap(), "abc.def.ghi");
    assert_eq!(parse_login_token("\"abc.def.ghi\"\n").unwrap(), "abc.def.ghi");
    assert_eq!(parse_login_token(r#"{"access_token":"a1"}"#).unwrap(), "a1");
    assert_eq!(parse_login_token(r#"{"token":"t1"}"#).unwrap(), "t1");
    assert!(matches!(parse_login_token(r#"{"user":"x"}"#), Err(ApiError::Decode(_))));
    assert!(matches!(parse_login_token("  "), Err(ApiError::Decode(_))));
}

#[test]
fn test_error_message_extraction() {
    let status = reqwest::StatusCode::BAD_REQUEST;
    assert_eq!(error_message(status, r#"{"message":"Stock insuficiente"}"#), "Stock insuficiente");
    assert_eq!(error_message(status, r#"{"message":["a","b"]}"#), "a, b");
    assert_eq!(body_message(r#"{"message":""}"#), None);
    assert_eq!(body_message("<html>"), None);
    assert_eq!(
        error_message(reqwest::StatusCode::NOT_FOUND, "<html>"),
        "Error 404 al realizar la solicitud: Not Found"
    );
}

#[test]
fn test_url_joining() {
    let client = HttpClient::new("http://api.local/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.url("/api/store"), "http://api.local/api/store");
    let client = HttpClient::new("http://api.local", Duration::from_secs(1)).unwrap();
    assert_eq!(client.url("api/store"), "http://api.local/api/store");
}

#[tokio::test]
async fn test_login_then_bearer_requests() {
    let (backend, _) = backend().await;

    // No token yet
    assert!(matches!(backend.list_stores().await, Err(ApiError::Unauthorized)));

    let token = backend.login("laura", "secreto").await.unwrap();
    assert_eq!(token, TOKEN);
    backend.set_token(Some(token));

    let stores = backend.list_stores().await.unwrap();
    assert_eq!(stores.len(), 2);
    assert!(stores[0].is_principal());

    backend.set_token(None);
    let err = backend.list_stores().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_login_failures_carry_server_message() {
    let (backend, _) = backend().await;

    let err = backend.login("", "x").await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "username should not be empty, password is too short");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // A rejected login keeps the server's reason
    match backend.login("otro", "x").await.unwrap_err() {
        ApiError::Http { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Credenciales inválidas");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(backend.login("anonimo", "x").await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_sign_in_shows_server_message() {
    let (backend, _) = backend().await;
    let form = SignInForm {
        username: "otra".to_string(),
        password: "mala".to_string(),
    };
    let err = sign_in(&backend, &form).await.unwrap_err();
    assert_eq!(err.title, "Credenciales inválidas");
    assert_eq!(err.description, ERROR_LOGIN_DESC);
    assert!(!err.session_expired);
}

#[tokio::test]
async fn test_http_errors() {
    let (backend, _) = backend().await;

    let err = backend.list_products().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Fallo interno");

    let err = backend.list_categories().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_query_parameters_and_paths() {
    let (backend, seen) = backend().await;

    let orders = backend
        .list_orders("store-1", NaiveDate::from_ymd_opt(2025, 5, 1))
        .await
        .unwrap();
    assert_eq!(orders[0].total_price, rust_decimal::Decimal::from(12500));
    backend.list_orders("store-1", None).await.unwrap();
    backend.delete_daily_expense("exp-3").await.unwrap();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            "/api/order?storeId=store-1&date=2025-05-01",
            "/api/order?storeId=store-1",
            "/api/daily-expense/exp-3",
        ]
    );
}

#[tokio::test]
async fn test_closing_lookups() {
    let (backend, _) = backend().await;
    let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

    assert_eq!(backend.count_closings("store-1", date).await.unwrap(), 2);
    // An empty body means there was no closing yet
    assert_eq!(backend.last_closing_of_day("store-1", date).await.unwrap(), None);
}

#[tokio::test]
async fn test_bill_and_pdf() {
    let (backend, _) = backend().await;

    let bill = backend.bill_for_custom_order("c-1").await.unwrap();
    assert_eq!(bill.bill_number.as_deref(), Some("F-0042"));
    assert_eq!(bill.total_price, rust_decimal::Decimal::from(8000));
    assert!(backend.get_bill(BillSource::Order, "o-1").await.is_err());

    let pdf = backend.generate_bill_pdf("bill-9").await.unwrap();
    assert_eq!(pdf, b"%PDF-1.4");
}
