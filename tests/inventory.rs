mod common;

use common::*;
use novabites::constants::*;
use novabites::inventory::*;
use novabites::models::{
    RequestStatus, RequestType, ReturnReason, Store, StoreRequest, StoreRequestDetail, TypeStore, User,
};

fn filled_table() -> RequestTable {
    let mut table = RequestTable::new();
    table.push(product("p1", "Pan de bono", 2500), 10);
    table.push(product("p2", "Mogolla", 1500), 4);
    table
}

fn request(id: &str, num: i64, status: RequestStatus) -> StoreRequest {
    StoreRequest {
        id: id.to_string(),
        num_id: num,
        status,
        ..Default::default()
    }
}

#[test]
fn test_request_table_editing() {
    let mut table = RequestTable::new();
    assert!(!table.is_complete(RequestKind::Supply));

    table.add_row();
    assert!(!table.is_complete(RequestKind::Supply));

    table.set_product(0, product("p1", "Pan de bono", 2500));
    table.set_quantity(0, -3);
    assert_eq!(table.rows()[0].quantity, 0);
    assert!(!table.is_complete(RequestKind::Supply));

    table.set_quantity(0, 5);
    assert!(table.is_complete(RequestKind::Supply));
    assert!(table.is_complete(RequestKind::Relocation));

    // Returns also need a reason on every row
    assert!(!table.is_complete(RequestKind::Return));
    table.set_return_reason(0, ReturnReason::Expired);
    assert!(table.is_complete(RequestKind::Return));

    table.remove_row(3);
    assert_eq!(table.len(), 1);
    table.remove_row(0);
    assert!(table.is_empty());
}

#[test]
fn test_build_supply_targets_principal() {
    let table = filled_table();
    let now = at(2025, 5, 1, 12, 0);
    let request = build_request(RequestKind::Supply, &table, &user(), &stores(), None, now).unwrap();

    assert_eq!(request.request_type, RequestType::SupplyRequest);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.target_store_id, "central");
    assert_eq!(request.requesting_store_id, "store-1");
    assert_eq!(request.requested_date, now);
    assert_eq!(request.details.len(), 2);
    assert_eq!(request.details[0].unit_price, dec(2500));
    assert_eq!(request.details[0].total_price, dec(25000));
    assert_eq!(request.details[0].return_reason, None);
}

#[test]
fn test_build_return_carries_reasons() {
    let mut table = filled_table();
    table.set_return_reason(0, ReturnReason::Damaged);
    let now = at(2025, 5, 1, 12, 0);

    let err = build_request(RequestKind::Return, &table, &user(), &stores(), None, now).unwrap_err();
    assert_eq!(err.title, ERROR_RETURN_INCOMPLETE);

    table.set_return_reason(1, ReturnReason::ExcessStock);
    let request = build_request(RequestKind::Return, &table, &user(), &stores(), None, now).unwrap();
    assert_eq!(request.request_type, RequestType::ReturnRequest);
    assert_eq!(request.details[1].return_reason, Some(ReturnReason::ExcessStock));
    assert_eq!(request.details[1].total_price, dec(6000));
}

#[test]
fn test_build_relocation_needs_target() {
    let table = filled_table();
    let now = at(2025, 5, 1, 12, 0);

    let err = build_request(RequestKind::Relocation, &table, &user(), &stores(), None, now).unwrap_err();
    assert_eq!(err.title, ERROR_TARGET_STORE);
    let err = build_request(RequestKind::Relocation, &table, &user(), &stores(), Some(""), now).unwrap_err();
    assert_eq!(err.title, ERROR_TARGET_STORE);

    let err = build_request(RequestKind::Relocation, &RequestTable::new(), &user(), &stores(), Some("store-2"), now)
        .unwrap_err();
    assert_eq!(err.title, ERROR_RELOCATION_INCOMPLETE);

    let request = build_request(RequestKind::Relocation, &table, &user(), &stores(), Some("store-2"), now).unwrap();
    assert_eq!(request.target_store_id, "store-2");
}

#[test]
fn test_missing_principal_store() {
    let only_branches = vec![store("store-1", "Sede Norte", TypeStore::Normal)];
    let err = build_request(
        RequestKind::Supply,
        &filled_table(),
        &user(),
        &only_branches,
        None,
        at(2025, 5, 1, 12, 0),
    )
    .unwrap_err();
    assert_eq!(err.title, ERROR_CENTRAL_STORE);
}

#[test]
fn test_relocation_targets_exclude_principal_and_own() {
    let all = stores();
    let targets: Vec<&str> = relocation_targets(&all, "store-1").iter().map(|s| s.id.as_str()).collect();
    assert_eq!(targets, vec!["store-2"]);
    assert_eq!(principal_store(&all).map(|s| s.id.as_str()), Some("central"));
}

#[test]
fn test_stepper_progress() {
    let mut req = request("r-1", 1, RequestStatus::Approved);
    req.requested_date = Some(at(2025, 5, 1, 9, 0));
    req.approved_date = Some(at(2025, 5, 1, 11, 0));

    let steps = stepper(&req);
    let states: Vec<StepState> = steps.iter().map(|s| s.state).collect();
    assert_eq!(
        states,
        vec![StepState::Completed, StepState::Current, StepState::Pending, StepState::Pending]
    );
    assert_eq!(steps[0].date, req.requested_date);
    assert_eq!(steps[1].date, req.approved_date);
    assert_eq!(steps[2].date, None);
    assert_eq!(steps[3].label, "Completada");
}

#[test]
fn test_stepper_rejected_and_canceled() {
    let steps = stepper(&request("r-1", 1, RequestStatus::Rejected));
    let states: Vec<StepState> = steps.iter().map(|s| s.state).collect();
    assert_eq!(
        states,
        vec![StepState::Completed, StepState::Rejected, StepState::Pending, StepState::Pending]
    );
    assert_eq!(steps[1].label, "Rechazada");
    assert_eq!(steps[1].date, None);

    let steps = stepper(&request("r-2", 2, RequestStatus::Canceled));
    assert_eq!(steps[1].state, StepState::Canceled);
    assert_eq!(steps[1].label, "Cancelada");
}

#[test]
fn test_request_total_skips_missing_prices() {
    let mut req = request("r-1", 1, RequestStatus::Pending);
    req.details = vec![
        StoreRequestDetail {
            total_price: Some(dec(25000)),
            ..Default::default()
        },
        StoreRequestDetail::default(),
        StoreRequestDetail {
            total_price: Some(dec(6000)),
            ..Default::default()
        },
    ];
    assert_eq!(request_total(&req), dec(31000));
}

#[test]
fn test_request_summaries_newest_first() {
    let mut older = request("r-1", 1, RequestStatus::Completed);
    older.requested_date = Some(at(2025, 4, 1, 9, 0));
    older.target_store = Some(Box::new(Store {
        name: "Planta Central".to_string(),
        ..Default::default()
    }));
    older.requesting_user = Some(Box::new(User {
        name: "Laura Gómez".to_string(),
        ..Default::default()
    }));

    let mut newer = request("r-2", 2, RequestStatus::Pending);
    newer.request_type = RequestType::ReturnRequest;
    newer.requested_date = Some(at(2025, 5, 1, 9, 0));

    let summaries = request_summaries(&[older, newer]);
    assert_eq!(summaries[0].request_number, "REQ-2");
    assert_eq!(summaries[0].type_name, "Devolución");
    assert_eq!(summaries[0].target_store_name, UNKNOWN_STORE);
    assert_eq!(summaries[0].requesting_user_name, UNKNOWN_USER);
    assert_eq!(summaries[1].target_store_name, "Planta Central");
    assert_eq!(summaries[1].status_label(), "Completada");
}

#[tokio::test]
async fn test_submit_request() {
    let backend = FakeBackend::new();
    let created = submit_request(&backend, RequestKind::Supply, &filled_table(), &user(), &stores(), None)
        .await
        .unwrap();
    assert_eq!(created.id, "req-1");

    let sent = backend.created_requests.lock().unwrap();
    assert_eq!(sent[0].target_store_id, "central");
    assert_eq!(sent[0].details.len(), 2);
}

#[tokio::test]
async fn test_submit_request_failure_title() {
    let backend = FakeBackend {
        fail_store_request: true,
        ..FakeBackend::new()
    };
    let err = submit_request(
        &backend,
        RequestKind::Relocation,
        &filled_table(),
        &user(),
        &stores(),
        Some("store-2"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.title, ERROR_RELOCATION_CREATE);
    assert!(!err.session_expired);
}

#[tokio::test]
async fn test_load_inventory_and_options() {
    let backend = FakeBackend {
        products: vec![product("p1", "Pan de bono", 2500)],
        store_products: vec![stock("p1", 8)],
        ..FakeBackend::new()
    };
    let rows = novabites::inventory::load_inventory(&backend, "store-1").await.unwrap();
    assert_eq!(rows[0].current_stock, 8);

    let (products, stores) = load_request_options(&backend).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(stores.len(), 3);
}

#[test]
fn test_inventory_table_renders_nested_columns() {
    let mut row = stock("p1", 8);
    row.product = Some(product("p1", "Pan de bono", 2500));
    let config = inventory_table(10);
    let cells = novabites::table::render_row(&row, &config.columns, novabites::utils::datetime::default_timezone());
    assert_eq!(cells[0].text(), "Pan de bono");
    assert_eq!(cells[2].text(), "8");
    assert_eq!(cells[3].text(), "$ 2.500");
}
