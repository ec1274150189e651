//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Base menu item entity, owned by the store
///
/// Never hard-deleted while historical order lines reference it;
/// admins retire an item with `is_active = false` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub store_id: String,
    pub category_id: String,
    pub name: String,
    /// Price in minor currency units
    pub base_price: i64,
    /// Optional promotional price; only effective when lower than `base_price`
    pub base_discount_price: Option<i64>,
    pub base_available: bool,
    pub is_active: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: String,
    pub name: String,
    pub base_price: i64,
    pub base_discount_price: Option<i64>,
    pub base_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub base_price: Option<i64>,
    pub base_discount_price: Option<i64>,
    /// Drops the promotional price; checked before `base_discount_price`
    #[serde(default)]
    pub clear_discount_price: bool,
    pub base_available: Option<bool>,
    pub is_active: Option<bool>,
}

/// Per-outlet view of a menu item after override resolution
///
/// Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveMenuView {
    pub menu_item_id: String,
    pub name: String,
    pub category_id: String,
    /// Price in minor currency units
    pub effective_price: i64,
    pub effective_available: bool,
}
