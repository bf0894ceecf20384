//! Custom (made-to-order) orders: list filter, draft form and status changes.

use crate::api::PosBackend;
use crate::constants::*;
use crate::models::{
    AuthUser, CustomOrder, NewCakeDetail, NewClient, NewCustomOrder, NewCustomOrderProduct, Product, StatusOrder,
};
use crate::notify::ValidationError;
use crate::utils::money::parse_amount_or_zero;
use rust_decimal::Decimal;

/// Tabs above the custom order list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Canceled,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Completed,
        StatusFilter::Canceled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Todos",
            StatusFilter::Pending => "En Progreso",
            StatusFilter::Completed => "Completados",
            StatusFilter::Canceled => "Cancelados",
        }
    }

    pub fn status(self) -> Option<StatusOrder> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(StatusOrder::Pending),
            StatusFilter::Completed => Some(StatusOrder::Completed),
            StatusFilter::Canceled => Some(StatusOrder::Canceled),
        }
    }

    pub fn matches(self, order: &CustomOrder) -> bool {
        self.status().map_or(true, |s| order.status == s)
    }

    pub fn apply(self, orders: &[CustomOrder]) -> Vec<&CustomOrder> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ClientDraft {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.phone.trim().is_empty() && self.email.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    pub product: Product,
    pub quantity: i64,
}

impl ProductLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.base_price * Decimal::from(self.quantity)
    }
}

/// One cake as typed in the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CakeDraft {
    pub image_url: String,
    pub pounds: String,
    pub tiers: String,
    pub price: String,
}

impl CakeDraft {
    pub fn pounds(&self) -> Decimal {
        parse_amount_or_zero(&self.pounds)
    }

    pub fn tiers(&self) -> u32 {
        self.tiers.trim().parse().unwrap_or(0)
    }

    pub fn price(&self) -> Decimal {
        parse_amount_or_zero(&self.price)
    }

    fn has_pounds(&self) -> bool {
        self.pounds() > Decimal::ZERO
    }

    fn has_tiers(&self) -> bool {
        self.tiers() > 0
    }

    fn has_price(&self) -> bool {
        self.price() > Decimal::ZERO
    }

    /// Any of pounds, tiers or price was filled in
    pub fn is_touched(&self) -> bool {
        self.has_pounds() || self.has_tiers() || self.has_price()
    }

    pub fn is_complete(&self) -> bool {
        self.has_pounds() && self.has_tiers() && self.has_price()
    }

    fn to_detail(&self) -> NewCakeDetail {
        NewCakeDetail {
            pounds: self.pounds(),
            tiers: self.tiers(),
            price: self.price(),
            image_url: self.image_url.trim().to_string(),
        }
    }
}

/// The "new custom order" form
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOrderDraft {
    pub client: ClientDraft,
    pub products: Vec<ProductLine>,
    pub cakes: Vec<CakeDraft>,
    pub deposit: String,
}

impl Default for CustomOrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomOrderDraft {
    /// Empty form with a single blank cake
    pub fn new() -> Self {
        Self {
            client: ClientDraft::default(),
            products: Vec::new(),
            cakes: vec![CakeDraft::default()],
            deposit: String::new(),
        }
    }

    /// Add one unit of a product, merging with an existing line
    pub fn add_product(&mut self, product: &Product) {
        match self.products.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.products.push(ProductLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Zero or less drops the line
    pub fn set_product_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_product(product_id);
            return;
        }
        if let Some(line) = self.products.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove_product(&mut self, product_id: &str) {
        self.products.retain(|l| l.product.id != product_id);
    }

    pub fn add_cake(&mut self) {
        self.cakes.push(CakeDraft::default());
    }

    pub fn remove_cake(&mut self, index: usize) {
        if index < self.cakes.len() {
            self.cakes.remove(index);
        }
    }

    /// Σ cake price + Σ base price × quantity
    pub fn total(&self) -> Decimal {
        let cakes: Decimal = self.cakes.iter().map(CakeDraft::price).sum();
        let products: Decimal = self.products.iter().map(ProductLine::subtotal).sum();
        cakes + products
    }

    pub fn deposit_amount(&self) -> Decimal {
        parse_amount_or_zero(&self.deposit)
    }

    pub fn remaining(&self) -> Decimal {
        self.total() - self.deposit_amount()
    }

    /// Checks run in form order; the first failure wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client.name.trim().is_empty() {
            return Err(ValidationError::new(ERROR_CLIENT_NAME, ERROR_CLIENT_NAME_DESC));
        }
        if self.client.phone.trim().is_empty() {
            return Err(ValidationError::new(ERROR_CLIENT_PHONE, ERROR_CLIENT_PHONE_DESC));
        }
        if self.products.is_empty() && !self.cakes.iter().any(CakeDraft::is_complete) {
            return Err(ValidationError::new(ERROR_EMPTY_ORDER, ERROR_EMPTY_ORDER_DESC));
        }

        for (i, cake) in self.cakes.iter().enumerate() {
            if !cake.is_touched() {
                continue;
            }
            let missing = if !cake.has_pounds() {
                Some("libras especificadas")
            } else if !cake.has_tiers() {
                Some("niveles especificados")
            } else if !cake.has_price() {
                Some("precio especificado")
            } else {
                None
            };
            if let Some(what) = missing {
                return Err(ValidationError::new(
                    ERROR_CAKE_INCOMPLETE,
                    format!("La torta {} debe tener {}.", i + 1, what),
                ));
            }
        }
        Ok(())
    }

    /// Body of `POST /api/custom-order`
    pub fn to_payload(&self, user: &AuthUser) -> NewCustomOrder {
        let client = (!self.client.is_blank()).then(|| NewClient {
            name: self.client.name.trim().to_string(),
            phone: self.client.phone.trim().to_string(),
            email: Some(self.client.email.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        });

        let products = (!self.products.is_empty()).then(|| {
            self.products
                .iter()
                .map(|l| NewCustomOrderProduct {
                    product_id: l.product.id.clone(),
                    quantity: l.quantity,
                    unit_price: l.product.base_price,
                })
                .collect()
        });

        let cakes: Vec<NewCakeDetail> = self
            .cakes
            .iter()
            .filter(|c| c.is_touched())
            .map(CakeDraft::to_detail)
            .collect();

        NewCustomOrder {
            store_id: user.store_id.clone(),
            user_id: user.user_id.clone(),
            deposit_amount: self.deposit_amount(),
            remaining_amount: self.remaining(),
            total_price: self.total(),
            status: StatusOrder::Pending,
            available: true,
            client,
            products,
            details: (!cakes.is_empty()).then_some(cakes),
        }
    }
}

pub async fn load_custom_orders(backend: &dyn PosBackend, store_id: &str) -> Result<Vec<CustomOrder>, ValidationError> {
    backend
        .list_custom_orders(Some(store_id))
        .await
        .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))
}

/// Validate and submit the draft
pub async fn create_custom_order(
    backend: &dyn PosBackend,
    draft: &CustomOrderDraft,
    user: &AuthUser,
) -> Result<CustomOrder, ValidationError> {
    draft.validate()?;
    let payload = draft.to_payload(user);
    log::info!(
        "Creating custom order: {} products, {} cakes, total {}",
        payload.products.as_ref().map_or(0, Vec::len),
        payload.details.as_ref().map_or(0, Vec::len),
        payload.total_price
    );
    backend
        .create_custom_order(&payload)
        .await
        .map_err(|e| ValidationError::api(ERROR_CUSTOM_ORDER_SAVE, &e))
}

pub async fn cancel_custom_order(backend: &dyn PosBackend, id: &str) -> Result<CustomOrder, ValidationError> {
    set_status(backend, id, StatusOrder::Canceled, ERROR_CUSTOM_ORDER_CANCEL).await
}

pub async fn complete_custom_order(backend: &dyn PosBackend, id: &str) -> Result<CustomOrder, ValidationError> {
    set_status(backend, id, StatusOrder::Completed, ERROR_CUSTOM_ORDER_COMPLETE).await
}

async fn set_status(
    backend: &dyn PosBackend,
    id: &str,
    status: StatusOrder,
    error_title: &str,
) -> Result<CustomOrder, ValidationError> {
    log::info!("Setting custom order {} to {:?}", id, status);
    backend
        .update_custom_order_status(id, status)
        .await
        .map_err(|e| ValidationError::api(error_title, &e))
}
