//! Order Model

use crate::cart::Cart;
use serde::{Deserialize, Serialize};

/// Order status
///
/// Forward-only chain; `Cancelled` is reachable from any non-terminal
/// status. See [`OrderStatus::successor`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The next status in the forward chain, if any
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

/// Payment status
///
/// `Unpaid -> Paid` and `Unpaid -> Failed` are the only transitions; a
/// refund is modeled as a separate adjustment record, not a status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Failed,
}

/// Payment method selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Settled at the till; marked paid only by explicit staff action
    #[default]
    Cash,
    /// Initiated with the payment collaborator; settled via its callback
    Online,
}

/// Order entity
///
/// Totals are derived once at creation and immutable afterwards.
/// Orders are never deleted (audit trail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub store_id: String,
    pub outlet_id: String,
    /// None for takeaway orders
    pub table_id: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub customer_notes: Option<String>,
    /// All amounts in minor currency units
    pub subtotal: i64,
    pub tax_amount: i64,
    pub service_charge: i64,
    pub total_amount: i64,
    /// Epoch milliseconds
    pub created_at: i64,
    pub updated_at: i64,
    /// Optimistic concurrency counter, assigned by the record store
    pub version: u64,
}

impl Order {
    /// Whether this order keeps its table occupied
    ///
    /// Blocking = not yet terminal, or money still owed (`unpaid` and not
    /// cancelled). A cancelled order never blocks, paid or not.
    pub fn blocks_table(&self) -> bool {
        !self.status.is_terminal()
            || (self.payment_status == PaymentStatus::Unpaid
                && self.status != OrderStatus::Cancelled)
    }

    /// Whether money is still owed on this order
    pub fn owes_payment(&self) -> bool {
        self.payment_status == PaymentStatus::Unpaid && self.status != OrderStatus::Cancelled
    }
}

/// Order line entity
///
/// `unit_price` snapshots the effective per-outlet price at order creation
/// and is never recomputed; later menu or override edits do not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    /// Display name snapshot for receipts
    pub name: String,
    pub quantity: i32,
    /// Snapshot of the effective price in minor currency units
    pub unit_price: i64,
    pub notes: Option<String>,
}

/// Checkout payload submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// None for takeaway orders
    pub table_id: Option<String>,
    pub cart: Cart,
    pub customer_notes: Option<String>,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_chain() {
        assert_eq!(
            OrderStatus::Pending.successor(),
            Some(OrderStatus::Confirmed)
        );
        assert_eq!(
            OrderStatus::Confirmed.successor(),
            Some(OrderStatus::Preparing)
        );
        assert_eq!(OrderStatus::Preparing.successor(), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.successor(), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::Completed.successor(), None);
        assert_eq!(OrderStatus::Cancelled.successor(), None);
    }

    #[test]
    fn test_blocks_table() {
        let mut order = Order {
            id: "o1".to_string(),
            store_id: "s1".to_string(),
            outlet_id: "out1".to_string(),
            table_id: Some("t1".to_string()),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_method: PaymentMethod::Cash,
            customer_notes: None,
            subtotal: 1000,
            tax_amount: 100,
            service_charge: 50,
            total_amount: 1150,
            created_at: 0,
            updated_at: 0,
            version: 1,
        };
        assert!(order.blocks_table());

        // Completed but unpaid still blocks
        order.status = OrderStatus::Completed;
        assert!(order.blocks_table());

        // Completed and paid releases
        order.payment_status = PaymentStatus::Paid;
        assert!(!order.blocks_table());

        // Cancelled never blocks, even unpaid
        order.status = OrderStatus::Cancelled;
        order.payment_status = PaymentStatus::Unpaid;
        assert!(!order.blocks_table());
        assert!(!order.owes_payment());
    }
}
