mod common;

use common::*;
use novabites::api::BillSource;
use novabites::constants::*;
use novabites::models::{Bill, Client, CustomOrder, StatusOrder};
use novabites::orders::*;
use rust_decimal::Decimal;

fn cake(pounds: &str, tiers: &str, price: &str) -> CakeDraft {
    CakeDraft {
        pounds: pounds.to_string(),
        tiers: tiers.to_string(),
        price: price.to_string(),
        ..Default::default()
    }
}

fn filled_draft() -> CustomOrderDraft {
    let mut draft = CustomOrderDraft::new();
    draft.client.name = "Marta Ruiz".to_string();
    draft.client.phone = "3001234567".to_string();
    draft
}

fn custom(id: &str, status: StatusOrder) -> CustomOrder {
    CustomOrder {
        id: id.to_string(),
        status,
        ..Default::default()
    }
}

#[test]
fn test_status_filter_cycle_and_apply() {
    let orders = vec![
        custom("a", StatusOrder::Pending),
        custom("b", StatusOrder::Completed),
        custom("c", StatusOrder::Pending),
        custom("d", StatusOrder::Canceled),
    ];

    assert_eq!(StatusFilter::All.apply(&orders).len(), 4);
    assert_eq!(StatusFilter::Pending.apply(&orders).len(), 2);
    assert_eq!(StatusFilter::Canceled.apply(&orders)[0].id, "d");

    assert_eq!(StatusFilter::All.next(), StatusFilter::Pending);
    assert_eq!(StatusFilter::Canceled.next(), StatusFilter::All);
    assert_eq!(StatusFilter::Pending.label(), "En Progreso");
}

#[test]
fn test_draft_totals() {
    let mut draft = filled_draft();
    let pan = product("p1", "Pan de bono", 2500);
    draft.add_product(&pan);
    draft.add_product(&pan);
    assert_eq!(draft.products.len(), 1);
    assert_eq!(draft.products[0].quantity, 2);

    draft.cakes[0] = cake("3", "2", "85000");
    draft.deposit = "40000".to_string();

    assert_eq!(draft.total(), dec(90000));
    assert_eq!(draft.remaining(), dec(50000));

    draft.set_product_quantity("p1", 0);
    assert!(draft.products.is_empty());
    assert_eq!(draft.total(), dec(85000));
}

#[test]
fn test_draft_validation_order() {
    let mut draft = CustomOrderDraft::new();
    assert_eq!(draft.validate().unwrap_err().title, ERROR_CLIENT_NAME);

    draft.client.name = "Marta Ruiz".to_string();
    assert_eq!(draft.validate().unwrap_err().title, ERROR_CLIENT_PHONE);

    draft.client.phone = "3001234567".to_string();
    assert_eq!(draft.validate().unwrap_err().title, ERROR_EMPTY_ORDER);

    draft.add_product(&product("p1", "Pan de bono", 2500));
    assert!(draft.validate().is_ok());

    // A touched cake must be complete
    draft.cakes[0] = cake("2", "", "60000");
    let err = draft.validate().unwrap_err();
    assert_eq!(err.title, ERROR_CAKE_INCOMPLETE);
    assert_eq!(err.description, "La torta 1 debe tener niveles especificados.");

    draft.add_cake();
    draft.cakes[0] = cake("2", "1", "60000");
    draft.cakes[1] = cake("", "", "10000");
    let err = draft.validate().unwrap_err();
    assert_eq!(err.description, "La torta 2 debe tener libras especificadas.");

    draft.remove_cake(1);
    assert!(draft.validate().is_ok());
}

#[test]
fn test_draft_payload() {
    let mut draft = filled_draft();
    draft.cakes[0] = cake("2.5", "2", "70000");
    draft.add_cake();
    draft.deposit = "20000".to_string();

    let payload = draft.to_payload(&user());
    assert_eq!(payload.store_id, "store-1");
    assert_eq!(payload.status, StatusOrder::Pending);
    assert!(payload.available);
    assert!(payload.products.is_none());

    // The untouched second cake is left out
    let cakes = payload.details.unwrap();
    assert_eq!(cakes.len(), 1);
    assert_eq!(cakes[0].tiers, 2);
    assert_eq!(cakes[0].pounds, "2.5".parse::<Decimal>().unwrap());

    let client = payload.client.unwrap();
    assert_eq!(client.name, "Marta Ruiz");
    assert_eq!(client.email, None);
    assert_eq!(payload.remaining_amount, dec(50000));

    let blank = CustomOrderDraft::new().to_payload(&user());
    assert!(blank.client.is_none());
    assert!(blank.details.is_none());
    assert_eq!(blank.total_price, Decimal::ZERO);
}

#[tokio::test]
async fn test_create_custom_order_validates_first() {
    let backend = FakeBackend::new();
    let err = create_custom_order(&backend, &CustomOrderDraft::new(), &user())
        .await
        .unwrap_err();
    assert_eq!(err.title, ERROR_CLIENT_NAME);
    assert!(backend.calls().is_empty());

    let mut draft = filled_draft();
    draft.add_product(&product("p1", "Pan de bono", 2500));
    let created = create_custom_order(&backend, &draft, &user()).await.unwrap();
    assert_eq!(created.num_id, 7);
    assert_eq!(backend.created_custom_orders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_changes() {
    let backend = FakeBackend::new();
    let order = cancel_custom_order(&backend, "c-1").await.unwrap();
    assert_eq!(order.status, StatusOrder::Canceled);
    let order = complete_custom_order(&backend, "c-1").await.unwrap();
    assert_eq!(order.status, StatusOrder::Completed);

    let backend = FakeBackend {
        unauthorized: true,
        ..FakeBackend::new()
    };
    let err = cancel_custom_order(&backend, "c-1").await.unwrap_err();
    assert_eq!(err.title, ERROR_CUSTOM_ORDER_CANCEL);
    assert!(err.session_expired);
}

#[test]
fn test_bill_entries_merge_newest_first() {
    let pan = product("p1", "Pan de bono", 2500);
    let mut sale = order("o-1", at(2025, 5, 1, 15, 0), &[(&pan, 2, 5000)]);
    sale.num_id = 40;
    sale.client = Some(Client {
        name: "  ".to_string(),
        ..Default::default()
    });

    let mut cake_order = custom("c-1", StatusOrder::Completed);
    cake_order.num_id = 3;
    cake_order.created_at = at(2025, 5, 2, 9, 0);
    cake_order.client = Some(Client {
        name: "Marta Ruiz".to_string(),
        doc_id: "1020".to_string(),
        ..Default::default()
    });

    let entries = bill_entries(&[sale], &[cake_order]);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].bill_number, "CUST-3");
    assert_eq!(entries[0].source, BillSource::CustomOrder);
    assert_eq!(entries[0].client_doc_id.as_deref(), Some("1020"));
    assert_eq!(entries[1].bill_number, "ORD-40");
    assert_eq!(entries[1].client_name, UNNAMED_CLIENT);
    assert_eq!(entries[1].kind_label(), "Orden");
}

#[test]
fn test_pdf_filename() {
    let mut bill = Bill {
        id: "bill-9".to_string(),
        ..Default::default()
    };
    assert_eq!(pdf_filename(&bill, date(2025, 5, 2)), "factura_bill-9_2025-05-02.pdf");

    bill.bill_number = Some("F-0042".to_string());
    assert_eq!(pdf_filename(&bill, date(2025, 5, 2)), "factura_F-0042_2025-05-02.pdf");

    bill.bill_number = Some("../F/00\\42".to_string());
    assert_eq!(pdf_filename(&bill, date(2025, 5, 2)), "factura_..-F-00-42_2025-05-02.pdf");
}

#[tokio::test]
async fn test_load_bill_not_found() {
    let backend = FakeBackend::new();
    let err = load_bill(&backend, BillSource::Order, "o-1").await.unwrap_err();
    assert_eq!(err.title, ERROR_BILL_NOT_FOUND);
    assert!(!err.session_expired);
    assert_eq!(backend.calls(), vec!["bill_for_order"]);
}

#[tokio::test]
async fn test_download_bill_pdf_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("facturas");
    let backend = FakeBackend {
        pdf: b"%PDF-1.4 fake".to_vec(),
        ..FakeBackend::new()
    };
    let bill = Bill {
        id: "bill-9".to_string(),
        bill_number: Some("F-0042".to_string()),
        ..Default::default()
    };

    let path = download_bill_pdf(&backend, &bill, &target).await.unwrap();
    assert!(path.starts_with(&target));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("factura_F-0042_"));
    assert!(name.ends_with(".pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fake");
}

#[tokio::test]
async fn test_load_bill_entries() {
    let pan = product("p1", "Pan de bono", 2500);
    let backend = FakeBackend {
        orders: vec![order("o-1", at(2025, 5, 1, 15, 0), &[(&pan, 1, 2500)])],
        custom_orders: vec![custom("c-1", StatusOrder::Pending)],
        ..FakeBackend::new()
    };
    let entries = load_bill_entries(&backend, "store-1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(backend.calls(), vec!["list_orders", "list_custom_orders"]);
}
