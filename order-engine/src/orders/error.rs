//! Order manager errors

use crate::store::StoreError;
use shared::error::{ErrorCode, ErrorReply};
use shared::models::{OrderStatus, PaymentStatus};
use thiserror::Error;

/// Order operation errors
#[derive(Debug, Error)]
pub enum OrderError {
    // Validation - rejected before any write
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid quantity {quantity} for item {menu_item_id}")]
    InvalidQuantity { menu_item_id: String, quantity: i32 },

    #[error("item not available at this outlet: {menu_item_id}")]
    ItemUnavailable { menu_item_id: String },

    // Not-found / tenant scope
    #[error("outlet not found: {0}")]
    OutletNotFound(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    // State - the persisted state forbids the request
    #[error("invalid transition: {current:?} -> {requested:?}")]
    InvalidTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    #[error("invalid payment transition: {current:?} -> {requested:?}")]
    InvalidPaymentTransition {
        current: PaymentStatus,
        requested: PaymentStatus,
    },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for ErrorReply {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::EmptyCart => ErrorReply::new(ErrorCode::EmptyCart, message),
            OrderError::InvalidQuantity {
                menu_item_id,
                quantity,
            } => ErrorReply::new(ErrorCode::InvalidQuantity, message).with_details(
                serde_json::json!({ "menu_item_id": menu_item_id, "quantity": quantity }),
            ),
            OrderError::ItemUnavailable { menu_item_id } => {
                ErrorReply::new(ErrorCode::ItemUnavailable, message)
                    .with_details(serde_json::json!({ "menu_item_id": menu_item_id }))
            }
            OrderError::OutletNotFound(_) => ErrorReply::new(ErrorCode::OutletNotFound, message),
            OrderError::TableNotFound(_) => ErrorReply::new(ErrorCode::TableNotFound, message),
            OrderError::OrderNotFound(_) => ErrorReply::new(ErrorCode::OrderNotFound, message),
            OrderError::InvalidTransition { current, requested } => {
                ErrorReply::new(ErrorCode::InvalidTransition, message).with_details(
                    serde_json::json!({ "current": current, "requested": requested }),
                )
            }
            OrderError::InvalidPaymentTransition { current, requested } => {
                ErrorReply::new(ErrorCode::InvalidPaymentTransition, message).with_details(
                    serde_json::json!({ "current": current, "requested": requested }),
                )
            }
            OrderError::Store(e) => ErrorReply::new(e.error_code(), message),
        }
    }
}
