//! Outlet Menu Override Model

use serde::{Deserialize, Serialize};

/// Per-outlet override of a base menu item
///
/// At most one row per (outlet, item) pair; the store upserts on the pair.
/// Absence of a row means "inherit the base item".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletMenuOverride {
    pub outlet_id: String,
    pub menu_item_id: String,
    /// Wins outright when set, even above the base price
    pub price_override: Option<i64>,
    pub is_available_override: Option<bool>,
}

/// Upsert override payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideUpsert {
    pub price_override: Option<i64>,
    pub is_available_override: Option<bool>,
}
