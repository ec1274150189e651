//! Occupancy rules
//!
//! Pure functions from a table plus its order set to the derived status.
//! The managers apply these against the latest order data inside their
//! optimistic-concurrency loops.

use shared::models::{DiningTable, Order, TableStatus};

/// Orders still owing payment (unpaid and not cancelled)
///
/// These are the ids surfaced by the release guard.
pub fn unpaid_orders(orders: &[Order]) -> Vec<&Order> {
    orders.iter().filter(|o| o.owes_payment()).collect()
}

/// Whether any order keeps the table occupied
pub fn has_blocking_orders(orders: &[Order]) -> bool {
    orders.iter().any(|o| o.blocks_table())
}

/// Derive a table's status from its current order set
///
/// Occupied wins over everything; with no blocking orders a manually
/// assigned reserved/needs-cleaning state survives, otherwise available.
pub fn compute_status(table: &DiningTable, orders: &[Order]) -> TableStatus {
    if has_blocking_orders(orders) {
        TableStatus::Occupied
    } else if table.status.is_manual() {
        table.status
    } else {
        TableStatus::Available
    }
}
