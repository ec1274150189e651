//! In-memory record store
//!
//! Reference binding for tests and examples. Catalog collections are
//! read-mostly dashmaps; orders, lines, and tables sit behind a single
//! write lock so the checkout commit is atomic and version checks are
//! linearizable.

use super::{RecordStore, StoreError, StoreResult, TableClaim};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use shared::models::{
    Category, DiningTable, MenuItem, Order, OrderLine, OrderStatus, Outlet, OutletMenuOverride,
};
use std::collections::HashMap;

#[derive(Default)]
struct Mutable {
    tables: HashMap<String, DiningTable>,
    orders: HashMap<String, Order>,
    /// Keyed by order id
    lines: HashMap<String, Vec<OrderLine>>,
}

/// In-memory [`RecordStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    categories: DashMap<String, Category>,
    items: DashMap<String, MenuItem>,
    /// Keyed by the unique (outlet, item) pair
    overrides: DashMap<(String, String), OutletMenuOverride>,
    outlets: DashMap<String, Outlet>,
    mutable: RwLock<Mutable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_category(&self, category: &Category) -> StoreResult<()> {
        self.categories
            .insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn list_categories(&self, store_id: &str) -> StoreResult<Vec<Category>> {
        let mut found: Vec<Category> = self
            .categories
            .iter()
            .filter(|entry| entry.store_id == store_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(found)
    }

    async fn put_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        self.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get_menu_item(&self, store_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self
            .items
            .get(item_id)
            .filter(|item| item.store_id == store_id)
            .map(|item| item.value().clone()))
    }

    async fn list_menu_items(&self, store_id: &str) -> StoreResult<Vec<MenuItem>> {
        let mut found: Vec<MenuItem> = self
            .items
            .iter()
            .filter(|entry| entry.store_id == store_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn upsert_override(&self, ov: &OutletMenuOverride) -> StoreResult<()> {
        let key = (ov.outlet_id.clone(), ov.menu_item_id.clone());
        self.overrides.insert(key, ov.clone());
        Ok(())
    }

    async fn delete_override(&self, outlet_id: &str, item_id: &str) -> StoreResult<bool> {
        let key = (outlet_id.to_string(), item_id.to_string());
        Ok(self.overrides.remove(&key).is_some())
    }

    async fn get_override(
        &self,
        outlet_id: &str,
        item_id: &str,
    ) -> StoreResult<Option<OutletMenuOverride>> {
        let key = (outlet_id.to_string(), item_id.to_string());
        Ok(self.overrides.get(&key).map(|ov| ov.value().clone()))
    }

    async fn list_overrides(&self, outlet_id: &str) -> StoreResult<Vec<OutletMenuOverride>> {
        Ok(self
            .overrides
            .iter()
            .filter(|entry| entry.outlet_id == outlet_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn put_outlet(&self, outlet: &Outlet) -> StoreResult<()> {
        self.outlets.insert(outlet.id.clone(), outlet.clone());
        Ok(())
    }

    async fn get_outlet(&self, store_id: &str, outlet_id: &str) -> StoreResult<Option<Outlet>> {
        Ok(self
            .outlets
            .get(outlet_id)
            .filter(|outlet| outlet.store_id == store_id)
            .map(|outlet| outlet.value().clone()))
    }

    async fn put_table(&self, table: &DiningTable) -> StoreResult<()> {
        let mut inner = self.mutable.write();
        let mut stored = table.clone();
        stored.version = 1;
        inner.tables.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn get_table(
        &self,
        store_id: &str,
        table_id: &str,
    ) -> StoreResult<Option<DiningTable>> {
        let inner = self.mutable.read();
        Ok(inner
            .tables
            .get(table_id)
            .filter(|table| table.store_id == store_id)
            .cloned())
    }

    async fn update_table(&self, table: &DiningTable, expected_version: u64) -> StoreResult<()> {
        let mut inner = self.mutable.write();
        let current = inner
            .tables
            .get(&table.id)
            .filter(|t| t.store_id == table.store_id)
            .ok_or_else(|| {
                StoreError::Constraint(format!("table {} does not exist", table.id))
            })?;
        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                entity: "table",
                id: table.id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }
        let mut stored = table.clone();
        stored.version = expected_version + 1;
        inner.tables.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn insert_order(
        &self,
        order: &Order,
        lines: &[OrderLine],
        claim: Option<TableClaim>,
    ) -> StoreResult<()> {
        let mut inner = self.mutable.write();
        if inner.orders.contains_key(&order.id) {
            return Err(StoreError::Constraint(format!(
                "order {} already exists",
                order.id
            )));
        }

        // Validate the table claim before touching anything
        let claimed = match claim {
            Some(claim) => {
                let current = inner
                    .tables
                    .get(&claim.table.id)
                    .filter(|t| t.store_id == claim.table.store_id)
                    .ok_or_else(|| {
                        StoreError::Constraint(format!("table {} does not exist", claim.table.id))
                    })?;
                if current.version != claim.expected_version {
                    return Err(StoreError::VersionConflict {
                        entity: "table",
                        id: claim.table.id.clone(),
                        expected: claim.expected_version,
                        found: current.version,
                    });
                }
                let mut stored = claim.table;
                stored.version = claim.expected_version + 1;
                Some(stored)
            }
            None => None,
        };

        let mut stored_order = order.clone();
        stored_order.version = 1;
        inner.lines.insert(order.id.clone(), lines.to_vec());
        inner.orders.insert(order.id.clone(), stored_order);
        if let Some(table) = claimed {
            inner.tables.insert(table.id.clone(), table);
        }
        Ok(())
    }

    async fn get_order(&self, store_id: &str, order_id: &str) -> StoreResult<Option<Order>> {
        let inner = self.mutable.read();
        Ok(inner
            .orders
            .get(order_id)
            .filter(|order| order.store_id == store_id)
            .cloned())
    }

    async fn list_order_lines(&self, order_id: &str) -> StoreResult<Vec<OrderLine>> {
        let inner = self.mutable.read();
        Ok(inner.lines.get(order_id).cloned().unwrap_or_default())
    }

    async fn list_orders_for_table(
        &self,
        store_id: &str,
        table_id: &str,
    ) -> StoreResult<Vec<Order>> {
        let inner = self.mutable.read();
        let mut found: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| o.store_id == store_id && o.table_id.as_deref() == Some(table_id))
            .cloned()
            .collect();
        found.sort_by_key(|o| o.created_at);
        Ok(found)
    }

    async fn list_orders_created_before(
        &self,
        store_id: &str,
        status: OrderStatus,
        cutoff: i64,
    ) -> StoreResult<Vec<Order>> {
        let inner = self.mutable.read();
        let mut found: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| o.store_id == store_id && o.status == status && o.created_at < cutoff)
            .cloned()
            .collect();
        found.sort_by_key(|o| o.created_at);
        Ok(found)
    }

    async fn update_order(&self, order: &Order, expected_version: u64) -> StoreResult<()> {
        let mut inner = self.mutable.write();
        let current = inner
            .orders
            .get(&order.id)
            .filter(|o| o.store_id == order.store_id)
            .ok_or_else(|| {
                StoreError::Constraint(format!("order {} does not exist", order.id))
            })?;
        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                entity: "order",
                id: order.id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }
        let mut stored = order.clone();
        stored.version = expected_version + 1;
        inner.orders.insert(stored.id.clone(), stored);
        Ok(())
    }
}
