use novabites::filter::{filter_items, lookup, value_at_path, FilterConfig, FilterState};
use novabites::table::*;
use novabites::utils::datetime::default_timezone;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    name: String,
    status: String,
    product: Nested,
}

#[derive(Serialize)]
struct Nested {
    category: Category,
}

#[derive(Serialize)]
struct Category {
    name: String,
}

fn row(name: &str, status: &str, category: &str) -> Row {
    Row {
        name: name.to_string(),
        status: status.to_string(),
        product: Nested {
            category: Category {
                name: category.to_string(),
            },
        },
    }
}

#[test]
fn test_lookup_dotted_paths() {
    let value = json!({"product": {"category": {"name": "Panes"}}, "tags": ["a", "b"], "gone": null});
    assert_eq!(value_at_path(&value, "product.category.name"), "Panes");
    assert_eq!(value_at_path(&value, "tags.1"), "b");
    assert!(lookup(&value, "gone").is_none());
    assert_eq!(value_at_path(&value, "product.missing.name"), "");
}

#[test]
fn test_filter_items_case_insensitive() {
    let rows = vec![
        row("Pan de bono", "available", "Panes"),
        row("Torta de chocolate", "available", "Tortas"),
        row("Almojábana", "unavailable", "Panes"),
    ];

    let mut filters = BTreeMap::new();
    filters.insert("product.category.name".to_string(), "panes".to_string());
    let matched = filter_items(&rows, &filters);
    assert_eq!(matched.len(), 2);

    // Every non-blank filter must match
    filters.insert("name".to_string(), "BONO".to_string());
    let matched = filter_items(&rows, &filters);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Pan de bono");

    // Blank filters match everything
    let blank: BTreeMap<String, String> = [("name".to_string(), "  ".to_string())].into_iter().collect();
    assert_eq!(filter_items(&rows, &blank).len(), 3);
}

#[test]
fn test_filter_keeps_surrounding_spaces() {
    let rows = vec![row("Pan de bono", "available", "Panes"), row("Pandebono", "available", "Panes")];

    let filters: BTreeMap<String, String> = [("name".to_string(), "pan ".to_string())].into_iter().collect();
    let matched = filter_items(&rows, &filters);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Pan de bono");

    let filters: BTreeMap<String, String> = [("name".to_string(), " bono".to_string())].into_iter().collect();
    assert_eq!(filter_items(&rows, &filters).len(), 1);
}

#[test]
fn test_filter_state_editing() {
    let mut state = FilterState::new(vec![
        FilterConfig::new("name", "Buscar", "Nombre"),
        FilterConfig::new("status", "Estado", "Estado"),
    ]);
    assert!(!state.is_active());

    state.push_char('t');
    state.push_char('o');
    assert_eq!(state.get("name"), "to");
    state.pop_char();
    assert_eq!(state.get("name"), "t");

    state.focus_next();
    state.push_char('u');
    assert_eq!(state.get("status"), "u");
    assert!(state.is_active());

    state.focus_next();
    assert_eq!(state.focused, 0);

    state.reset();
    assert!(!state.is_active());
}

#[test]
fn test_pagination_bounds_and_labels() {
    let labels = PageLabels::default();
    let mut pagination = Pagination::new(10);

    assert_eq!(pagination.total_pages(0), 1);
    assert_eq!(pagination.range_label(0, &labels), "Mostrando 0-0 de 0");

    assert_eq!(pagination.total_pages(42), 5);
    assert_eq!(pagination.range_label(42, &labels), "Mostrando 1-10 de 42");

    for _ in 0..10 {
        pagination.next(42);
    }
    assert_eq!(pagination.current_page(), 5);
    assert_eq!(pagination.bounds(42), (40, 42));
    assert_eq!(pagination.range_label(42, &labels), "Mostrando 41-42 de 42");

    // The list shrank under the cursor
    pagination.clamp(15);
    assert_eq!(pagination.current_page(), 2);

    pagination.previous();
    pagination.previous();
    assert_eq!(pagination.current_page(), 1);

    let items: Vec<u32> = (0..25).collect();
    assert_eq!(pagination.slice(&items), &items[0..10]);
}

#[test]
fn test_status_vocabulary() {
    assert_eq!(status_tone("Completed"), Some(BadgeTone::Positive));
    assert_eq!(status_tone("canceled"), Some(BadgeTone::Negative));
    assert_eq!(status_tone("LOW STOCK"), Some(BadgeTone::Warning));
    assert_eq!(status_tone("processing"), Some(BadgeTone::Neutral));
    assert_eq!(status_tone("Pendiente"), None);
}

#[test]
fn test_render_cell_rules() {
    let tz = default_timezone();

    let date = json!("2025-03-10T03:00:00Z");
    assert_eq!(render_cell(Some(&date), CellRender::Date, tz).text(), "09/03/2025");

    let status = json!("pending");
    assert_eq!(
        render_cell(Some(&status), CellRender::Text, tz),
        Cell::Badge {
            label: "Pending".to_string(),
            tone: BadgeTone::Warning
        }
    );

    let flag = json!(false);
    assert_eq!(render_cell(Some(&flag), CellRender::Text, tz).text(), "Unavailable");

    let price = json!("12500");
    assert_eq!(render_cell(Some(&price), CellRender::Money, tz).text(), "$ 12.500");

    let weight = json!(2.456);
    assert_eq!(render_cell(Some(&weight), CellRender::Decimal, tz).text(), "2.46");

    assert_eq!(render_cell(None, CellRender::Text, tz).text(), "");
}

#[test]
fn test_render_row_follows_columns() {
    let columns = vec![
        Column::new("name", "Nombre", CellRender::Text, 50),
        Column::new("product.category.name", "Categoría", CellRender::Text, 30),
        Column::new("status", "Estado", CellRender::Text, 20),
    ];
    let cells = render_row(&row("Pan de bono", "available", "Panes"), &columns, default_timezone());
    let texts: Vec<&str> = cells.iter().map(Cell::text).collect();
    assert_eq!(texts, vec!["Pan de bono", "Panes", "Available"]);
}
