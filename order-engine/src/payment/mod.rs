//! Payment collaborator interface
//!
//! The engine never speaks a payment protocol. Online checkout fires
//! [`PaymentGateway::initiate_payment`] after the order commit
//! (fire-and-confirm-later); the collaborator's webhook later reports a
//! [`PaymentResult`] which drives the payment status transition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment collaborator errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("payment initiation rejected: {0}")]
    Rejected(String),
}

/// Opaque token handed back by initiation, forwarded to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentToken(pub String);

/// Outcome reported by the collaborator's webhook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentResult {
    Succeeded,
    Failed,
}

/// Payment collaborator
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start collecting `amount` (minor units) for `order_id`
    async fn initiate_payment(&self, order_id: &str, amount: i64)
    -> Result<PaymentToken, PaymentError>;
}
