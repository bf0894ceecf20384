//! Sales terminal: catalogue, cart, payment and order creation.

pub mod cart;
pub mod catalog;
pub mod payment;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{available_categories, available_products, Catalog, SubcategorySelection};
pub use payment::{CashInput, KeypadKey, PaymentDetails, PaymentForm, PaymentMethod, TransferOption};

use crate::api::PosBackend;
use crate::constants::{ERROR_EMPTY_CART, ERROR_EMPTY_CART_DESC, ERROR_ORDER_CREATE, ERROR_REPORT_LOAD};
use crate::models::{AuthUser, NewOrder, Order, StatusOrder};
use crate::notify::ValidationError;

/// Assemble the `POST /api/order` body
pub fn build_order(cart: &Cart, payment: PaymentDetails, user: &AuthUser, client_id: Option<String>) -> NewOrder {
    NewOrder {
        details: cart.to_details(),
        total_price: cart.total(),
        status: StatusOrder::Completed,
        client_id,
        store_id: user.store_id.clone(),
        user_id: user.user_id.clone(),
        payment_method: payment.payment_method,
        amount_received: payment.amount_received,
        change: payment.change,
    }
}

/// Validate the payment and create the order
pub async fn checkout(
    backend: &dyn PosBackend,
    cart: &Cart,
    payment: &PaymentForm,
    user: &AuthUser,
) -> Result<Order, ValidationError> {
    if cart.is_empty() {
        return Err(ValidationError::new(ERROR_EMPTY_CART, ERROR_EMPTY_CART_DESC));
    }
    let details = payment.validate()?;
    let order = build_order(cart, details, user, None);

    log::info!(
        "Creating order with {} lines, total {}",
        order.details.len(),
        order.total_price
    );
    backend
        .create_order(&order)
        .await
        .map_err(|e| ValidationError::api(ERROR_ORDER_CREATE, &e))
}

/// Fetch products, categories and the store's stock in one go
pub async fn load_catalog(backend: &dyn PosBackend, store_id: &str) -> Result<Catalog, ValidationError> {
    let load_err = |e: crate::api::ApiError| {
        log::error!("Catalog for store {} failed: {}", store_id, e);
        ValidationError::api(ERROR_REPORT_LOAD, &e)
    };

    let products = backend.list_products().await.map_err(load_err)?;
    let categories = backend.list_categories().await.map_err(load_err)?;
    let store_products = backend.list_store_products(store_id).await.map_err(load_err)?;

    let catalog = Catalog::new(products, categories, store_products);
    log::info!(
        "Catalog loaded: {} sellable products in {} categories",
        catalog.available_products().len(),
        catalog.categories().len()
    );
    Ok(catalog)
}
