//! Outlet override resolution
//!
//! Merges a base menu item with an optional per-outlet override into the
//! effective per-outlet view. A missing override is the common case, not
//! an error.
//!
//! Precedence:
//! - `price_override` wins outright when set, even above the base price
//!   (outlets may charge more, e.g. a delivery surcharge)
//! - otherwise the discount price applies only when lower than the base
//! - `is_available_override` wins when set, otherwise the base flag

use shared::models::{EffectiveMenuView, MenuItem, OutletMenuOverride};

/// Resolve the effective price and availability for one item
pub fn resolve(item: &MenuItem, ov: Option<&OutletMenuOverride>) -> EffectiveMenuView {
    let base_price = match item.base_discount_price {
        Some(discount) if discount < item.base_price => discount,
        _ => item.base_price,
    };

    EffectiveMenuView {
        menu_item_id: item.id.clone(),
        name: item.name.clone(),
        category_id: item.category_id.clone(),
        effective_price: ov.and_then(|o| o.price_override).unwrap_or(base_price),
        effective_available: ov
            .and_then(|o| o.is_available_override)
            .unwrap_or(item.base_available),
    }
}
