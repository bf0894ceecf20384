//! Shopping cart with stock checks.

use crate::constants::{ERROR_LOW_STOCK, ERROR_NO_STOCK, ERROR_NO_STOCK_DESC};
use crate::models::{NewDetailOrder, Product};
use crate::notify::ValidationError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Producto sin stock")]
    OutOfStock,

    #[error("Stock insuficiente: solo hay {available} unidades disponibles")]
    InsufficientStock { available: i64 },
}

impl CartError {
    pub fn to_validation(&self) -> ValidationError {
        match self {
            CartError::OutOfStock => ValidationError::new(ERROR_NO_STOCK, ERROR_NO_STOCK_DESC),
            CartError::InsufficientStock { available } => ValidationError::new(
                ERROR_LOW_STOCK,
                format!("Solo hay {} unidades disponibles.", available),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.base_price * Decimal::from(self.quantity)
    }
}

/// Lines in insertion order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Add one unit, bounded by the store stock
    pub fn add(&mut self, product: &Product, stock: i64) -> Result<(), CartError> {
        if stock <= 0 {
            return Err(CartError::OutOfStock);
        }
        let current = self.quantity_of(&product.id);
        if current >= stock {
            return Err(CartError::InsufficientStock { available: stock });
        }

        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Set a quantity; zero or less removes the line
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64, stock: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        if quantity > stock {
            return Err(CartError::InsufficientStock { available: stock });
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ base price × quantity
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Order details; `price` is the line subtotal
    pub fn to_details(&self) -> Vec<NewDetailOrder> {
        self.lines
            .iter()
            .map(|l| NewDetailOrder {
                product_id: l.product.id.clone(),
                quantity: l.quantity,
                price: l.subtotal(),
            })
            .collect()
    }
}
