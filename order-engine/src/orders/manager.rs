//! OrdersManager - order lifecycle command processing

use super::error::{OrderError, OrderResult};
use super::lifecycle::{self, Advance};
use crate::catalog::{CatalogError, CatalogService};
use crate::payment::{PaymentGateway, PaymentResult};
use crate::pricing;
use crate::store::{RecordStore, StoreError, TableClaim};
use crate::tables::occupancy;
use crate::tenant::TenantContext;
use shared::models::{
    DiningTable, Order, OrderCreate, OrderLine, OrderStatus, PaymentMethod, PaymentStatus,
    TableStatus,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Retries after a version conflict before giving up
const DEFAULT_RETRY_LIMIT: u32 = 3;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Order lifecycle service
#[derive(Clone)]
pub struct OrdersManager {
    store: Arc<dyn RecordStore>,
    catalog: CatalogService,
    gateway: Option<Arc<dyn PaymentGateway>>,
    retry_limit: u32,
}

impl OrdersManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            store,
            gateway: None,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    /// Attach the payment collaborator used for online checkout
    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Checkout
    ///
    /// Validates the cart against the outlet's effective menu, snapshots
    /// each line's price, computes totals, and commits order + lines +
    /// table claim atomically. For online payment the initiation call is
    /// fired strictly after the commit; its failure never unwinds the
    /// order, which simply stays unpaid until the collaborator reports.
    pub async fn create_order(&self, ctx: &TenantContext, req: OrderCreate) -> OrderResult<String> {
        if req.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        for line in req.cart.lines() {
            if line.quantity < 1 {
                return Err(OrderError::InvalidQuantity {
                    menu_item_id: line.menu_item_id.clone(),
                    quantity: line.quantity,
                });
            }
        }

        let outlet = self
            .store
            .get_outlet(&ctx.store_id, &ctx.outlet_id)
            .await?
            .filter(|o| o.is_active)
            .ok_or_else(|| OrderError::OutletNotFound(ctx.outlet_id.clone()))?;

        // Snapshot effective prices at this instant; later menu or
        // override edits must not touch these lines
        let order_id = Uuid::new_v4().to_string();
        let mut lines = Vec::with_capacity(req.cart.lines().len());
        for cart_line in req.cart.lines() {
            let view = match self.catalog.effective_item(ctx, &cart_line.menu_item_id).await {
                Ok(view) => view,
                Err(CatalogError::Store(e)) => return Err(e.into()),
                Err(CatalogError::ItemNotFound(id)) => {
                    return Err(OrderError::ItemUnavailable { menu_item_id: id });
                }
            };
            let view = view
                .filter(|v| v.effective_available)
                .ok_or_else(|| OrderError::ItemUnavailable {
                    menu_item_id: cart_line.menu_item_id.clone(),
                })?;
            lines.push(OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                menu_item_id: cart_line.menu_item_id.clone(),
                name: view.name,
                quantity: cart_line.quantity,
                unit_price: view.effective_price,
                notes: cart_line.notes.clone(),
            });
        }

        let totals = pricing::compute(&lines, outlet.tax_percent, outlet.service_percent);

        let now = now_ms();
        let order = Order {
            id: order_id.clone(),
            store_id: ctx.store_id.clone(),
            outlet_id: ctx.outlet_id.clone(),
            table_id: req.table_id.clone(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_method: req.payment_method,
            customer_notes: req.customer_notes.clone(),
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            service_charge: totals.service_charge,
            total_amount: totals.total,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        let mut attempt = 0;
        loop {
            let claim = match &req.table_id {
                Some(table_id) => Some(self.claim_table(ctx, table_id).await?),
                None => None,
            };
            match self.store.insert_order(&order, &lines, claim).await {
                Ok(()) => break,
                // The table moved under us (e.g. a racing release);
                // re-read it and claim again
                Err(StoreError::VersionConflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            order_id = %order_id,
            table_id = ?req.table_id,
            total = totals.total,
            "order created"
        );
        crate::audit_log!(&ctx.store_id, "create_order", &order_id);

        if req.payment_method == PaymentMethod::Online {
            match &self.gateway {
                Some(gateway) => match gateway.initiate_payment(&order_id, totals.total).await {
                    Ok(token) => {
                        debug!(order_id = %order_id, token = %token.0, "payment initiated")
                    }
                    Err(e) => warn!(
                        order_id = %order_id,
                        error = %e,
                        "payment initiation failed; order stays unpaid"
                    ),
                },
                None => warn!(
                    order_id = %order_id,
                    "no payment gateway configured; order stays unpaid"
                ),
            }
        }

        Ok(order_id)
    }

    /// Advance the order status
    ///
    /// Only the immediate successor or cancellation is accepted;
    /// re-applying the current status is a no-op.
    pub async fn advance_status(
        &self,
        ctx: &TenantContext,
        order_id: &str,
        target: OrderStatus,
    ) -> OrderResult<()> {
        let mut attempt = 0;
        loop {
            let order = self.load(ctx, order_id).await?;
            match lifecycle::check_transition(order.status, target)? {
                Advance::Noop => return Ok(()),
                Advance::Apply => {}
            }

            let mut updated = order.clone();
            updated.status = target;
            updated.updated_at = now_ms();
            match self.store.update_order(&updated, order.version).await {
                Ok(()) => {
                    info!(
                        order_id = %order_id,
                        from = ?order.status,
                        to = ?target,
                        "order status advanced"
                    );
                    crate::audit_log!(&ctx.store_id, "advance_status", order_id);
                    if let Some(table_id) = &updated.table_id {
                        self.refresh_table_status(ctx, table_id).await;
                    }
                    return Ok(());
                }
                Err(StoreError::VersionConflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Set the payment status
    ///
    /// `unpaid -> paid` / `unpaid -> failed` only; same-state retries are
    /// no-ops. Cash orders reach `paid` exclusively through this explicit
    /// staff action.
    pub async fn set_payment_status(
        &self,
        ctx: &TenantContext,
        order_id: &str,
        target: PaymentStatus,
    ) -> OrderResult<()> {
        let mut attempt = 0;
        loop {
            let order = self.load(ctx, order_id).await?;
            match lifecycle::check_payment_transition(order.payment_status, target)? {
                Advance::Noop => return Ok(()),
                Advance::Apply => {}
            }

            let mut updated = order.clone();
            updated.payment_status = target;
            updated.updated_at = now_ms();
            match self.store.update_order(&updated, order.version).await {
                Ok(()) => {
                    info!(order_id = %order_id, payment_status = ?target, "payment status set");
                    crate::audit_log!(&ctx.store_id, "set_payment_status", order_id);
                    if let Some(table_id) = &updated.table_id {
                        self.refresh_table_status(ctx, table_id).await;
                    }
                    return Ok(());
                }
                Err(StoreError::VersionConflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Inbound webhook glue for the payment collaborator
    pub async fn on_payment_result(
        &self,
        ctx: &TenantContext,
        order_id: &str,
        result: PaymentResult,
    ) -> OrderResult<()> {
        let target = match result {
            PaymentResult::Succeeded => PaymentStatus::Paid,
            PaymentResult::Failed => PaymentStatus::Failed,
        };
        self.set_payment_status(ctx, order_id, target).await
    }

    /// Pending orders created before `cutoff_ms`, for an external reaper
    ///
    /// The core has no order timeout of its own; an indefinitely pending
    /// order is valid.
    pub async fn stale_pending_since(
        &self,
        ctx: &TenantContext,
        cutoff_ms: i64,
    ) -> OrderResult<Vec<String>> {
        let orders = self
            .store
            .list_orders_created_before(&ctx.store_id, OrderStatus::Pending, cutoff_ms)
            .await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.outlet_id == ctx.outlet_id)
            .map(|o| o.id)
            .collect())
    }

    /// Tenant-scoped order read
    pub async fn get_order(&self, ctx: &TenantContext, order_id: &str) -> OrderResult<Order> {
        self.load(ctx, order_id).await
    }

    /// Lines of a tenant-scoped order
    pub async fn get_order_lines(
        &self,
        ctx: &TenantContext,
        order_id: &str,
    ) -> OrderResult<Vec<OrderLine>> {
        self.load(ctx, order_id).await?;
        Ok(self.store.list_order_lines(order_id).await?)
    }

    /// Read the table and stamp it occupied, keeping the version we saw
    async fn claim_table(&self, ctx: &TenantContext, table_id: &str) -> OrderResult<TableClaim> {
        let table: DiningTable = self
            .store
            .get_table(&ctx.store_id, table_id)
            .await?
            .filter(|t| t.is_active && t.outlet_id == ctx.outlet_id)
            .ok_or_else(|| OrderError::TableNotFound(table_id.to_string()))?;
        let expected_version = table.version;
        let mut claimed = table;
        claimed.status = TableStatus::Occupied;
        Ok(TableClaim {
            table: claimed,
            expected_version,
        })
    }

    /// Tenant-scoped order load; foreign records read as missing
    async fn load(&self, ctx: &TenantContext, order_id: &str) -> OrderResult<Order> {
        self.store
            .get_order(&ctx.store_id, order_id)
            .await?
            .filter(|o| o.outlet_id == ctx.outlet_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Recompute the table status from the latest order set
    ///
    /// Derived data: a failure here is logged and left for the next
    /// mutation (or an explicit release) to repair, never propagated into
    /// the already-committed order change.
    async fn refresh_table_status(&self, ctx: &TenantContext, table_id: &str) {
        for _ in 0..=self.retry_limit {
            let table = match self.store.get_table(&ctx.store_id, table_id).await {
                Ok(Some(table)) => table,
                Ok(None) => return,
                Err(e) => {
                    warn!(table_id = %table_id, error = %e, "table status refresh failed");
                    return;
                }
            };
            let orders = match self
                .store
                .list_orders_for_table(&ctx.store_id, table_id)
                .await
            {
                Ok(orders) => orders,
                Err(e) => {
                    warn!(table_id = %table_id, error = %e, "table status refresh failed");
                    return;
                }
            };

            let status = occupancy::compute_status(&table, &orders);
            if status == table.status {
                return;
            }
            let mut updated = table.clone();
            updated.status = status;
            match self.store.update_table(&updated, table.version).await {
                Ok(()) => {
                    info!(table_id = %table_id, status = ?status, "table status recomputed");
                    return;
                }
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(e) => {
                    warn!(table_id = %table_id, error = %e, "table status refresh failed");
                    return;
                }
            }
        }
        warn!(table_id = %table_id, "table status refresh gave up after conflicts");
    }
}
