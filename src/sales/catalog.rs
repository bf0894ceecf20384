//! What the sales terminal can sell right now.
//!
//! A product is sellable when the store carries it, it is flagged available and
//! it has stock. Category and subcategory pickers only list groups that contain
//! sellable products.

use crate::constants::{SUBCATEGORY_OTHERS_ID, SUBCATEGORY_OTHERS_NAME};
use crate::models::{CategoryProduct, Product, StoreProduct, SubcategoryProduct};
use std::collections::HashSet;

/// Subcategory picker state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcategorySelection {
    /// Every product of the category
    All,
    /// Products of the category without a subcategory ("Otros")
    Others,
    Subcategory(String),
}

/// Products the store can sell now
pub fn available_products(products: &[Product], store_products: &[StoreProduct]) -> Vec<Product> {
    let sellable: HashSet<&str> = store_products
        .iter()
        .filter(|sp| sp.available && sp.current_stock > 0)
        .map(|sp| sp.product_id.as_str())
        .collect();

    products
        .iter()
        .filter(|p| sellable.contains(p.id.as_str()))
        .cloned()
        .collect()
}

/// Categories holding at least one sellable product, in catalogue order
pub fn available_categories(categories: &[CategoryProduct], available: &[Product]) -> Vec<CategoryProduct> {
    let ids: HashSet<&str> = available.iter().filter_map(|p| p.category_id.as_deref()).collect();
    categories
        .iter()
        .filter(|c| ids.contains(c.id.as_str()))
        .cloned()
        .collect()
}

/// Stock and price lookup against the store's records
pub fn stock_of(store_products: &[StoreProduct], product_id: &str) -> i64 {
    store_products
        .iter()
        .find(|sp| sp.product_id == product_id)
        .map(|sp| sp.current_stock)
        .unwrap_or(0)
}

/// Browsing state of the sales screen
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    store_products: Vec<StoreProduct>,
    available: Vec<Product>,
    categories: Vec<CategoryProduct>,
    selected_category: Option<String>,
    selected_subcategory: Option<SubcategorySelection>,
}

impl Catalog {
    /// Build the catalogue; the first available category is selected
    pub fn new(products: Vec<Product>, categories: Vec<CategoryProduct>, store_products: Vec<StoreProduct>) -> Self {
        let available = available_products(&products, &store_products);
        let categories = available_categories(&categories, &available);
        let mut catalog = Self {
            products,
            store_products,
            available,
            categories,
            selected_category: None,
            selected_subcategory: None,
        };
        if let Some(first) = catalog.categories.first().map(|c| c.id.clone()) {
            catalog.select_category(&first);
        }
        catalog
    }

    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn store_products(&self) -> &[StoreProduct] {
        &self.store_products
    }

    pub fn available_products(&self) -> &[Product] {
        &self.available
    }

    pub fn categories(&self) -> &[CategoryProduct] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&CategoryProduct> {
        let id = self.selected_category.as_deref()?;
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn selected_subcategory(&self) -> Option<&SubcategorySelection> {
        self.selected_subcategory.as_ref()
    }

    pub fn stock_of(&self, product_id: &str) -> i64 {
        stock_of(&self.store_products, product_id)
    }

    fn category_products(&self) -> Vec<&Product> {
        match self.selected_category.as_deref() {
            Some(id) => self
                .available
                .iter()
                .filter(|p| p.category_id.as_deref() == Some(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Subcategories of the selected category that have sellable products
    pub fn subcategories(&self) -> Vec<SubcategoryProduct> {
        let products = self.category_products();
        match self.selected_category() {
            Some(category) => category
                .subcategories
                .iter()
                .filter(|sub| products.iter().any(|p| p.subcategory_id.as_deref() == Some(sub.id.as_str())))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the "Otros" pseudo-subcategory applies
    pub fn has_uncategorized(&self) -> bool {
        self.category_products().iter().any(|p| p.subcategory_id.is_none())
    }

    /// Picker options: real subcategories, then "Otros" when needed
    pub fn subcategory_options(&self) -> Vec<SubcategoryProduct> {
        let mut options = self.subcategories();
        if !options.is_empty() && self.has_uncategorized() {
            options.push(SubcategoryProduct {
                id: SUBCATEGORY_OTHERS_ID.to_string(),
                name: SUBCATEGORY_OTHERS_NAME.to_string(),
                category_id: self.selected_category.clone(),
            });
        }
        options
    }

    /// Select a category; its first subcategory is preselected when it has any
    pub fn select_category(&mut self, category_id: &str) {
        self.selected_category = Some(category_id.to_string());
        self.selected_subcategory = self
            .subcategories()
            .first()
            .map(|sub| SubcategorySelection::Subcategory(sub.id.clone()));
    }

    /// Select by id; `""` clears and `"others"` picks products without subcategory
    pub fn select_subcategory(&mut self, subcategory_id: &str) {
        self.selected_subcategory = match subcategory_id {
            "" => None,
            SUBCATEGORY_OTHERS_ID => Some(SubcategorySelection::Others),
            id => {
                if self.subcategories().iter().any(|s| s.id == id) {
                    Some(SubcategorySelection::Subcategory(id.to_string()))
                } else {
                    return;
                }
            }
        };
    }

    /// Products shown in the grid for the current selection
    pub fn visible_products(&self) -> Vec<&Product> {
        let products = self.category_products();
        if self.subcategories().is_empty() {
            return products;
        }
        match &self.selected_subcategory {
            None | Some(SubcategorySelection::All) => products,
            Some(SubcategorySelection::Others) => products.into_iter().filter(|p| p.subcategory_id.is_none()).collect(),
            Some(SubcategorySelection::Subcategory(id)) => products
                .into_iter()
                .filter(|p| p.subcategory_id.as_deref() == Some(id.as_str()))
                .collect(),
        }
    }
}
