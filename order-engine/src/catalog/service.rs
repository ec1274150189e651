//! Catalog service
//!
//! Admin menu operations and the per-outlet effective view. Items are
//! never hard-deleted while historical order lines reference them; the
//! admin path only flips `is_active`.

use super::resolver;
use crate::store::{RecordStore, StoreError};
use crate::tenant::TenantContext;
use shared::models::{
    Category, CategoryCreate, EffectiveMenuView, MenuItem, MenuItemCreate, MenuItemUpdate,
    OutletMenuOverride, OverrideUpsert,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("menu item not found: {0}")]
    ItemNotFound(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Menu catalog service
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Effective menu for the caller's outlet
    ///
    /// Joins active base items with the outlet's override rows on every
    /// call; nothing is cached across a price or availability change.
    pub async fn effective_menu(&self, ctx: &TenantContext) -> CatalogResult<Vec<EffectiveMenuView>> {
        let items = self.store.list_menu_items(&ctx.store_id).await?;
        let overrides: HashMap<String, OutletMenuOverride> = self
            .store
            .list_overrides(&ctx.outlet_id)
            .await?
            .into_iter()
            .map(|ov| (ov.menu_item_id.clone(), ov))
            .collect();

        Ok(items
            .iter()
            .filter(|item| item.is_active)
            .map(|item| resolver::resolve(item, overrides.get(&item.id)))
            .collect())
    }

    /// Effective view of a single item, if it exists and is active
    pub async fn effective_item(
        &self,
        ctx: &TenantContext,
        item_id: &str,
    ) -> CatalogResult<Option<EffectiveMenuView>> {
        let Some(item) = self.store.get_menu_item(&ctx.store_id, item_id).await? else {
            return Ok(None);
        };
        if !item.is_active {
            return Ok(None);
        }
        let ov = self.store.get_override(&ctx.outlet_id, item_id).await?;
        Ok(Some(resolver::resolve(&item, ov.as_ref())))
    }

    // ==================== Admin: items ====================

    pub async fn create_item(
        &self,
        ctx: &TenantContext,
        data: MenuItemCreate,
    ) -> CatalogResult<MenuItem> {
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            store_id: ctx.store_id.clone(),
            category_id: data.category_id,
            name: data.name,
            base_price: data.base_price,
            base_discount_price: data.base_discount_price,
            base_available: data.base_available.unwrap_or(true),
            is_active: true,
        };
        self.store.put_menu_item(&item).await?;
        crate::audit_log!(&ctx.store_id, "create_item", &item.id, &item.name);
        Ok(item)
    }

    pub async fn update_item(
        &self,
        ctx: &TenantContext,
        item_id: &str,
        data: MenuItemUpdate,
    ) -> CatalogResult<MenuItem> {
        let mut item = self
            .store
            .get_menu_item(&ctx.store_id, item_id)
            .await?
            .ok_or_else(|| CatalogError::ItemNotFound(item_id.to_string()))?;

        if let Some(category_id) = data.category_id {
            item.category_id = category_id;
        }
        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(base_price) = data.base_price {
            item.base_price = base_price;
        }
        if data.clear_discount_price {
            item.base_discount_price = None;
        } else if let Some(discount) = data.base_discount_price {
            item.base_discount_price = Some(discount);
        }
        if let Some(available) = data.base_available {
            item.base_available = available;
        }
        if let Some(is_active) = data.is_active {
            item.is_active = is_active;
        }

        self.store.put_menu_item(&item).await?;
        crate::audit_log!(&ctx.store_id, "update_item", item_id);
        Ok(item)
    }

    /// Soft-deactivate; the row stays for historical order lines
    pub async fn deactivate_item(
        &self,
        ctx: &TenantContext,
        item_id: &str,
    ) -> CatalogResult<MenuItem> {
        let update = MenuItemUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        self.update_item(ctx, item_id, update).await
    }

    // ==================== Admin: categories ====================

    pub async fn create_category(
        &self,
        ctx: &TenantContext,
        data: CategoryCreate,
    ) -> CatalogResult<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            store_id: ctx.store_id.clone(),
            name: data.name,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        self.store.put_category(&category).await?;
        Ok(category)
    }

    pub async fn list_categories(&self, ctx: &TenantContext) -> CatalogResult<Vec<Category>> {
        Ok(self.store.list_categories(&ctx.store_id).await?)
    }

    // ==================== Admin: outlet overrides ====================

    /// Create or replace the override row for (outlet, item)
    pub async fn upsert_override(
        &self,
        ctx: &TenantContext,
        item_id: &str,
        data: OverrideUpsert,
    ) -> CatalogResult<OutletMenuOverride> {
        // The base item must exist in the caller's store scope
        self.store
            .get_menu_item(&ctx.store_id, item_id)
            .await?
            .ok_or_else(|| CatalogError::ItemNotFound(item_id.to_string()))?;

        let ov = OutletMenuOverride {
            outlet_id: ctx.outlet_id.clone(),
            menu_item_id: item_id.to_string(),
            price_override: data.price_override,
            is_available_override: data.is_available_override,
        };
        self.store.upsert_override(&ov).await?;
        crate::audit_log!(&ctx.store_id, "upsert_override", item_id);
        Ok(ov)
    }

    /// Remove the override row; the item falls back to its base values
    pub async fn remove_override(&self, ctx: &TenantContext, item_id: &str) -> CatalogResult<bool> {
        let removed = self.store.delete_override(&ctx.outlet_id, item_id).await?;
        if removed {
            crate::audit_log!(&ctx.store_id, "remove_override", item_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ctx() -> TenantContext {
        TenantContext::new("store-1", "outlet-1")
    }

    async fn service() -> (CatalogService, TenantContext) {
        let store = Arc::new(MemoryStore::new());
        (CatalogService::new(store), ctx())
    }

    async fn seed_item(service: &CatalogService, ctx: &TenantContext, name: &str, price: i64) -> MenuItem {
        service
            .create_item(
                ctx,
                MenuItemCreate {
                    category_id: "cat-1".to_string(),
                    name: name.to_string(),
                    base_price: price,
                    base_discount_price: None,
                    base_available: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_effective_menu_without_overrides() {
        let (service, ctx) = service().await;
        seed_item(&service, &ctx, "Satay", 25000).await;

        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].effective_price, 25000);
        assert!(menu[0].effective_available);
    }

    #[tokio::test]
    async fn test_effective_menu_applies_outlet_override() {
        let (service, ctx) = service().await;
        let item = seed_item(&service, &ctx, "Satay", 25000).await;

        service
            .upsert_override(
                &ctx,
                &item.id,
                OverrideUpsert {
                    price_override: Some(23000),
                    is_available_override: None,
                },
            )
            .await
            .unwrap();

        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu[0].effective_price, 23000);

        // Another outlet of the same store still sees the base price
        let other = TenantContext::new("store-1", "outlet-2");
        let menu = service.effective_menu(&other).await.unwrap();
        assert_eq!(menu[0].effective_price, 25000);
    }

    #[tokio::test]
    async fn test_upsert_override_replaces_existing_row() {
        let (service, ctx) = service().await;
        let item = seed_item(&service, &ctx, "Satay", 25000).await;

        for price in [23000, 21000] {
            service
                .upsert_override(
                    &ctx,
                    &item.id,
                    OverrideUpsert {
                        price_override: Some(price),
                        is_available_override: None,
                    },
                )
                .await
                .unwrap();
        }

        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu[0].effective_price, 21000);

        assert!(service.remove_override(&ctx, &item.id).await.unwrap());
        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu[0].effective_price, 25000);
    }

    #[tokio::test]
    async fn test_deactivated_item_leaves_the_menu() {
        let (service, ctx) = service().await;
        let item = seed_item(&service, &ctx, "Satay", 25000).await;

        service.deactivate_item(&ctx, &item.id).await.unwrap();

        assert!(service.effective_menu(&ctx).await.unwrap().is_empty());
        assert!(service.effective_item(&ctx, &item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_override_for_unknown_item_rejected() {
        let (service, ctx) = service().await;
        let result = service
            .upsert_override(&ctx, "ghost", OverrideUpsert::default())
            .await;
        assert!(matches!(result, Err(CatalogError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_item_clears_discount() {
        let (service, ctx) = service().await;
        let item = seed_item(&service, &ctx, "Satay", 25000).await;

        service
            .update_item(
                &ctx,
                &item.id,
                MenuItemUpdate {
                    base_discount_price: Some(20000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu[0].effective_price, 20000);

        service
            .update_item(
                &ctx,
                &item.id,
                MenuItemUpdate {
                    clear_discount_price: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let menu = service.effective_menu(&ctx).await.unwrap();
        assert_eq!(menu[0].effective_price, 25000);
    }
}
