//! TablesManager - table lifecycle operations
//!
//! Release and manual-state assignment re-validate their guards against
//! the latest order data on every optimistic-concurrency retry, so a
//! request racing a new order on the same table can never slip past the
//! unpaid check.

use super::error::{TableError, TableResult};
use super::occupancy;
use crate::store::{RecordStore, StoreError};
use crate::tenant::TenantContext;
use shared::models::{DiningTable, DiningTableCreate, ManualTableStatus, TableStatus};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Retries after a version conflict before giving up
const DEFAULT_RETRY_LIMIT: u32 = 3;

/// Table lifecycle service
#[derive(Clone)]
pub struct TablesManager {
    store: Arc<dyn RecordStore>,
    retry_limit: u32,
}

impl TablesManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Admin creates a table; it starts available
    pub async fn create_table(
        &self,
        ctx: &TenantContext,
        data: DiningTableCreate,
    ) -> TableResult<DiningTable> {
        let table = DiningTable {
            id: Uuid::new_v4().to_string(),
            store_id: ctx.store_id.clone(),
            outlet_id: ctx.outlet_id.clone(),
            name: data.name,
            capacity: data.capacity.unwrap_or(4),
            status: TableStatus::Available,
            is_active: true,
            version: 0,
        };
        self.store.put_table(&table).await?;
        crate::audit_log!(&ctx.store_id, "create_table", &table.id, &table.name);
        self.load(ctx, &table.id).await
    }

    /// Live status derived from the current order set
    pub async fn status(&self, ctx: &TenantContext, table_id: &str) -> TableResult<TableStatus> {
        let table = self.load(ctx, table_id).await?;
        let orders = self
            .store
            .list_orders_for_table(&ctx.store_id, table_id)
            .await?;
        Ok(occupancy::compute_status(&table, &orders))
    }

    /// Explicit release
    ///
    /// Fails with the blocking order ids while any order on the table is
    /// unpaid and not cancelled. On success the table is available
    /// unconditionally, clearing any manual state.
    pub async fn release(&self, ctx: &TenantContext, table_id: &str) -> TableResult<()> {
        let mut attempt = 0;
        loop {
            let table = self.load(ctx, table_id).await?;
            let orders = self
                .store
                .list_orders_for_table(&ctx.store_id, table_id)
                .await?;

            let unpaid: Vec<String> = occupancy::unpaid_orders(&orders)
                .iter()
                .map(|o| o.id.clone())
                .collect();
            if !unpaid.is_empty() {
                return Err(TableError::UnpaidOrdersExist(unpaid));
            }

            let mut updated = table.clone();
            updated.status = TableStatus::Available;
            match self.store.update_table(&updated, table.version).await {
                Ok(()) => {
                    info!(table_id = %table_id, "table released");
                    crate::audit_log!(&ctx.store_id, "release_table", table_id);
                    return Ok(());
                }
                // A new order may have landed between the guard check and
                // the write; re-read and re-validate
                Err(StoreError::VersionConflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Assign a manual state (reserved / needs cleaning)
    ///
    /// Rejected while the table still has blocking orders.
    pub async fn set_manual_status(
        &self,
        ctx: &TenantContext,
        table_id: &str,
        status: ManualTableStatus,
    ) -> TableResult<()> {
        let mut attempt = 0;
        loop {
            let table = self.load(ctx, table_id).await?;
            let orders = self
                .store
                .list_orders_for_table(&ctx.store_id, table_id)
                .await?;

            let unpaid: Vec<String> = occupancy::unpaid_orders(&orders)
                .iter()
                .map(|o| o.id.clone())
                .collect();
            if !unpaid.is_empty() {
                return Err(TableError::UnpaidOrdersExist(unpaid));
            }
            if occupancy::has_blocking_orders(&orders) {
                return Err(TableError::TableOccupied(table_id.to_string()));
            }

            let mut updated = table.clone();
            updated.status = status.into();
            match self.store.update_table(&updated, table.version).await {
                Ok(()) => {
                    crate::audit_log!(&ctx.store_id, "set_manual_status", table_id);
                    return Ok(());
                }
                Err(StoreError::VersionConflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Tenant-scoped load; inactive and foreign tables read as missing
    async fn load(&self, ctx: &TenantContext, table_id: &str) -> TableResult<DiningTable> {
        self.store
            .get_table(&ctx.store_id, table_id)
            .await?
            .filter(|t| t.is_active && t.outlet_id == ctx.outlet_id)
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))
    }
}
