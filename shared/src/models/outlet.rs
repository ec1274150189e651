//! Outlet Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outlet entity
///
/// Tax and service percentages are read once at order creation; later
/// changes never retroactively alter existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlet {
    pub id: String,
    pub store_id: String,
    pub name: String,
    /// Tax rate in percent (e.g. 10 = 10%)
    pub tax_percent: Decimal,
    /// Service charge rate in percent
    pub service_percent: Decimal,
    pub is_active: bool,
}
