//! Order totals calculator
//!
//! Pure arithmetic over integer minor-currency units. Percentages go
//! through `rust_decimal`; each component is rounded half-up on its own,
//! never on the sum.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::OrderLine;

/// Computed totals, all in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub tax_amount: i64,
    pub service_charge: i64,
    pub total: i64,
}

/// Round half-up to whole minor-currency units
fn round_component(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Compute subtotal, tax, service charge, and total for a set of lines
///
/// Quantity validation is the caller's job; this function has no error
/// cases.
pub fn compute(lines: &[OrderLine], tax_percent: Decimal, service_percent: Decimal) -> OrderTotals {
    let subtotal: i64 = lines
        .iter()
        .map(|line| line.unit_price * i64::from(line.quantity))
        .sum();

    let base = Decimal::from(subtotal);
    let tax_amount = round_component(base * tax_percent / Decimal::ONE_HUNDRED);
    let service_charge = round_component(base * service_percent / Decimal::ONE_HUNDRED);

    OrderTotals {
        subtotal,
        tax_amount,
        service_charge,
        total: subtotal + tax_amount + service_charge,
    }
}
