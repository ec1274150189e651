//! Wire-level error reply
//!
//! The engine returns typed errors; route handlers serialize them through
//! [`ErrorReply`] so the admin UI always receives a stable code plus the
//! structured details it needs to render an actionable message (blocking
//! order ids, current vs requested status).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable error codes exposed to clients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors - rejected before any write
    EmptyCart,
    InvalidQuantity,
    ItemUnavailable,

    // State errors - the persisted state forbids the request
    InvalidTransition,
    InvalidPaymentTransition,
    UnpaidOrdersExist,
    TableOccupied,

    // Not-found / tenant scope errors
    OrderNotFound,
    TableNotFound,
    OutletNotFound,
    MenuItemNotFound,

    // Transient / infrastructure errors
    Conflict,
    StoreUnavailable,
    InternalError,
}

impl ErrorCode {
    /// Whether the client may retry the identical request
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorCode::Conflict | ErrorCode::StoreUnavailable)
    }
}

/// Structured error reply
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ErrorReply {
    pub code: ErrorCode,
    pub message: String,
    /// Code-specific payload, e.g. blocking order ids for
    /// `UNPAID_ORDERS_EXIST`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorReply {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::UnpaidOrdersExist).unwrap();
        assert_eq!(json, "\"UNPAID_ORDERS_EXIST\"");
    }

    #[test]
    fn test_retryable_codes() {
        assert!(ErrorCode::Conflict.is_retryable());
        assert!(ErrorCode::StoreUnavailable.is_retryable());
        assert!(!ErrorCode::UnpaidOrdersExist.is_retryable());
        assert!(!ErrorCode::EmptyCart.is_retryable());
    }

    #[test]
    fn test_details_omitted_when_none() {
        let reply = ErrorReply::new(ErrorCode::OrderNotFound, "order not found");
        let json = serde_json::to_string(&reply).unwrap();
        assert!(!json.contains("details"));
    }
}
