//! Field-matching filter over any serializable list.
//!
//! Filters address values through dotted paths (`product.category.name`) on
//! the item's JSON form, so the same filter bar works for every table.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One filter input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub field: String,
    pub placeholder: String,
    pub label: String,
}

impl FilterConfig {
    pub fn new(field: &str, placeholder: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            placeholder: placeholder.to_string(),
            label: label.to_string(),
        }
    }
}

/// Look up a dotted path; missing and null values are `None`
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// String form of the value at `path`, empty when absent
pub fn value_at_path(value: &Value, path: &str) -> String {
    match lookup(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn matches(value: &Value, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(field, needle)| {
        // Blank filters are ignored; others match as typed, spaces included
        if needle.trim().is_empty() {
            return true;
        }
        value_at_path(value, field)
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

/// Keep the items matching every non-blank filter (case-insensitive substring)
pub fn filter_items<'a, T: Serialize>(items: &'a [T], filters: &BTreeMap<String, String>) -> Vec<&'a T> {
    if filters.values().all(|v| v.trim().is_empty()) {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| match serde_json::to_value(item) {
            Ok(value) => matches(&value, filters),
            Err(e) => {
                log::warn!("Skipping unserializable item in filter: {}", e);
                false
            }
        })
        .collect()
}

/// Current values of a filter bar
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    configs: Vec<FilterConfig>,
    values: BTreeMap<String, String>,
    /// Index of the input being edited
    pub focused: usize,
}

impl FilterState {
    pub fn new(configs: Vec<FilterConfig>) -> Self {
        Self {
            configs,
            values: BTreeMap::new(),
            focused: 0,
        }
    }

    pub fn configs(&self) -> &[FilterConfig] {
        &self.configs
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.trim().is_empty())
    }

    pub fn apply<'a, T: Serialize>(&self, items: &'a [T]) -> Vec<&'a T> {
        filter_items(items, &self.values)
    }

    pub fn focus_next(&mut self) {
        if !self.configs.is_empty() {
            self.focused = (self.focused + 1) % self.configs.len();
        }
    }

    /// Append a character to the focused input
    pub fn push_char(&mut self, c: char) {
        if let Some(config) = self.configs.get(self.focused) {
            self.values.entry(config.field.clone()).or_default().push(c);
        }
    }

    /// Remove the last character of the focused input
    pub fn pop_char(&mut self) {
        if let Some(config) = self.configs.get(self.focused) {
            if let Some(value) = self.values.get_mut(&config.field) {
                value.pop();
            }
        }
    }
}
