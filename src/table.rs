//! Generic paginated table model.
//!
//! Columns address row values by dotted path on the row's JSON form; the
//! terminal widget only draws the [`Cell`]s produced here.

use crate::constants::{DEFAULT_ITEMS_PER_PAGE, PAGE_LABEL_OF, PAGE_LABEL_SHOWING};
use crate::filter::lookup;
use crate::utils::datetime::{format_dd_mm_yyyy, parse_api_datetime};
use crate::utils::money::{format_cop, parse_amount};
use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Words rendered as status badges, compared case-insensitively
pub const STATUS_VOCABULARY: [&str; 15] = [
    "available",
    "unavailable",
    "completed",
    "processing",
    "pending",
    "rejected",
    "cancelled",
    "canceled",
    "on hold",
    "active",
    "inactive",
    "suspended",
    "out of stock",
    "in stock",
    "low stock",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellRender {
    #[default]
    Text,
    Date,
    Decimal,
    Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub render: CellRender,
    /// Width as a percentage of the table
    pub width: u16,
}

impl Column {
    pub fn new(key: &str, header: &str, render: CellRender, width: u16) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            render,
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLabels {
    pub showing: String,
    pub of: String,
}

impl Default for PageLabels {
    fn default() -> Self {
        Self {
            showing: PAGE_LABEL_SHOWING.to_string(),
            of: PAGE_LABEL_OF.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    pub items_per_page: usize,
    pub page_labels: PageLabels,
}

impl TableConfig {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page_labels: PageLabels::default(),
        }
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge { label: String, tone: BadgeTone },
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Badge { label, .. } => label,
        }
    }
}

/// Badge colour of a vocabulary word, `None` when the word is not a status
pub fn status_tone(status: &str) -> Option<BadgeTone> {
    let lower = status.to_lowercase();
    if !STATUS_VOCABULARY.contains(&lower.as_str()) {
        return None;
    }
    let tone = match lower.as_str() {
        "available" | "completed" | "active" | "in stock" => BadgeTone::Positive,
        "unavailable" | "cancelled" | "canceled" | "rejected" | "inactive" | "out of stock" => BadgeTone::Negative,
        "pending" | "on hold" | "suspended" | "low stock" => BadgeTone::Warning,
        _ => BadgeTone::Neutral,
    };
    Some(tone)
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn badge(status: &str, tone: BadgeTone) -> Cell {
    Cell::Badge {
        label: capitalize(status),
        tone,
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

/// Render one value following the column rules.
///
/// Order: date columns, status words, booleans, numeric columns, plain text.
pub fn render_cell(value: Option<&Value>, render: CellRender, tz: FixedOffset) -> Cell {
    let Some(value) = value else {
        return Cell::Text(String::new());
    };

    if render == CellRender::Date {
        if let Value::String(s) = value {
            return match parse_api_datetime(s) {
                Some(dt) => Cell::Text(format_dd_mm_yyyy(&dt, tz)),
                None => Cell::Text(s.clone()),
            };
        }
    }

    if let Value::String(s) = value {
        if let Some(tone) = status_tone(s) {
            return badge(s, tone);
        }
    }

    if let Value::Bool(b) = value {
        return if *b {
            badge("Available", BadgeTone::Positive)
        } else {
            badge("Unavailable", BadgeTone::Negative)
        };
    }

    match render {
        CellRender::Decimal => {
            if let Some(d) = as_decimal(value) {
                return Cell::Text(d.round_dp(2).to_string());
            }
        }
        CellRender::Money => {
            if let Some(d) = as_decimal(value) {
                return Cell::Text(format_cop(d));
            }
        }
        _ => {}
    }

    match value {
        Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Render the cells of a row
pub fn render_row<T: Serialize>(item: &T, columns: &[Column], tz: FixedOffset) -> Vec<Cell> {
    let value = serde_json::to_value(item).unwrap_or(Value::Null);
    columns
        .iter()
        .map(|column| render_cell(lookup(&value, &column.key), column.render, tz))
        .collect()
}

/// 1-based page cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn next(&mut self, total_items: usize) {
        if self.current_page < self.total_pages(total_items) {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pull the cursor back when the list shrank under it
    pub fn clamp(&mut self, total_items: usize) {
        self.current_page = self.current_page.min(self.total_pages(total_items));
    }

    /// Half-open index range of the current page
    pub fn bounds(&self, total_items: usize) -> (usize, usize) {
        let start = ((self.current_page - 1) * self.items_per_page).min(total_items);
        let end = (start + self.items_per_page).min(total_items);
        (start, end)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds(items.len());
        &items[start..end]
    }

    /// "Mostrando 1-10 de 42"; an empty list reads "Mostrando 0-0 de 0"
    pub fn range_label(&self, total_items: usize, labels: &PageLabels) -> String {
        let (start, end) = self.bounds(total_items);
        let first = if total_items == 0 { 0 } else { start + 1 };
        format!("{} {}-{} {} {}", labels.showing, first, end, labels.of, total_items)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
