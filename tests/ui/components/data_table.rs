use crossterm::event::{KeyCode, KeyEvent};
use novabites::filter::FilterConfig;
use novabites::table::{CellRender, Column, TableConfig};
use novabites::ui::components::DataTable;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
struct Row {
    name: &'static str,
}

fn rows(names: &[&'static str]) -> Vec<Row> {
    names.iter().map(|name| Row { name }).collect()
}

fn table() -> DataTable<Row> {
    let config =
        TableConfig::new(vec![Column::new("name", "Nombre", CellRender::Text, 100)]).with_items_per_page(2);
    let mut table = DataTable::new(config, vec![FilterConfig::new("name", "Buscar...", "Nombre")]);
    table.set_items(rows(&["Pan de bono", "Mogolla", "Almojábana", "Pan de queso", "Buñuelo"]));
    table
}

fn press(table: &mut DataTable<Row>, code: KeyCode) -> bool {
    table.handle_key(KeyEvent::from(code))
}

fn selected(table: &DataTable<Row>) -> &'static str {
    table.selected_item().map(|row| row.name).unwrap_or("")
}

#[test]
fn test_row_navigation_wraps_within_page() {
    let mut table = table();
    assert_eq!(selected(&table), "Pan de bono");

    assert!(press(&mut table, KeyCode::Char('j')));
    assert_eq!(selected(&table), "Mogolla");
    press(&mut table, KeyCode::Down);
    assert_eq!(selected(&table), "Pan de bono");
    press(&mut table, KeyCode::Char('k'));
    assert_eq!(selected(&table), "Mogolla");
}

#[test]
fn test_page_navigation() {
    let mut table = table();
    press(&mut table, KeyCode::Char('j'));
    press(&mut table, KeyCode::Right);
    assert_eq!(selected(&table), "Almojábana");

    press(&mut table, KeyCode::Right);
    assert_eq!(selected(&table), "Buñuelo");
    // Already on the last page
    press(&mut table, KeyCode::PageDown);
    assert_eq!(selected(&table), "Buñuelo");

    press(&mut table, KeyCode::Left);
    assert_eq!(selected(&table), "Almojábana");
    assert!(!press(&mut table, KeyCode::Char('x')));
}

#[test]
fn test_filter_editing() {
    let mut table = table();
    press(&mut table, KeyCode::Right);

    assert!(press(&mut table, KeyCode::Char('/')));
    assert!(table.is_editing_filter());
    for c in "PAN".chars() {
        press(&mut table, KeyCode::Char(c));
    }
    assert_eq!(table.filtered().len(), 2);
    assert_eq!(selected(&table), "Pan de bono");

    press(&mut table, KeyCode::Esc);
    assert!(!table.is_editing_filter());
    press(&mut table, KeyCode::Char('j'));
    assert_eq!(selected(&table), "Pan de queso");

    press(&mut table, KeyCode::Char('/'));
    press(&mut table, KeyCode::Delete);
    assert_eq!(table.filtered().len(), 5);
}

#[test]
fn test_set_items_clamps_page_and_selection() {
    let mut table = table();
    press(&mut table, KeyCode::Right);
    press(&mut table, KeyCode::Right);
    assert_eq!(selected(&table), "Buñuelo");

    table.set_items(rows(&["Roscón"]));
    assert_eq!(selected(&table), "Roscón");
    assert_eq!(table.items().len(), 1);

    table.set_items(Vec::new());
    assert_eq!(table.selected_item(), None);
}

#[test]
fn test_slash_ignored_without_filters() {
    let config = TableConfig::new(vec![Column::new("name", "Nombre", CellRender::Text, 100)]);
    let mut table: DataTable<Row> = DataTable::new(config, Vec::new());
    assert!(!press(&mut table, KeyCode::Char('/')));
    assert!(!table.is_editing_filter());
}
