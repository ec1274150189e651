//! Table manager errors

use crate::store::StoreError;
use shared::error::{ErrorCode, ErrorReply};
use thiserror::Error;

/// Table operation errors
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Money is still owed on the listed orders
    #[error("table has unpaid orders: {0:?}")]
    UnpaidOrdersExist(Vec<String>),

    /// The table has active (paid) orders, so manual states cannot apply
    #[error("table is occupied: {0}")]
    TableOccupied(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type TableResult<T> = Result<T, TableError>;

impl From<TableError> for ErrorReply {
    fn from(err: TableError) -> Self {
        let message = err.to_string();
        match err {
            TableError::TableNotFound(_) => ErrorReply::new(ErrorCode::TableNotFound, message),
            TableError::UnpaidOrdersExist(order_ids) => {
                ErrorReply::new(ErrorCode::UnpaidOrdersExist, message)
                    .with_details(serde_json::json!({ "blocking_order_ids": order_ids }))
            }
            TableError::TableOccupied(_) => ErrorReply::new(ErrorCode::TableOccupied, message),
            TableError::Store(e) => ErrorReply::new(e.error_code(), message),
        }
    }
}
