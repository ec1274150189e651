//! Record store collaborator
//!
//! The engine owns no persistence. It talks to a record store through
//! [`RecordStore`]: plain CRUD for the read-mostly catalog, per-entity
//! optimistic locking for orders and tables, and one atomic insert for
//! checkout (order + lines + table claim commit together or not at all).
//!
//! Bindings implement this trait against the real database; the in-memory
//! [`MemoryStore`] is the reference binding used by tests and examples.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use shared::models::{
    Category, DiningTable, MenuItem, Order, OrderLine, OrderStatus, Outlet, OutletMenuOverride,
};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("version conflict on {entity} {id}: expected {expected}, found {found}")]
    VersionConflict {
        entity: &'static str,
        id: String,
        expected: u64,
        found: u64,
    },

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Wire code for this failure; conflicts and outages are retryable
    pub fn error_code(&self) -> shared::error::ErrorCode {
        match self {
            StoreError::VersionConflict { .. } => shared::error::ErrorCode::Conflict,
            StoreError::Unavailable(_) => shared::error::ErrorCode::StoreUnavailable,
            StoreError::Constraint(_) => shared::error::ErrorCode::InternalError,
        }
    }
}

/// Table write bundled into an order insert
///
/// Lets checkout claim the table in the same atomic commit as the order;
/// the version precondition makes a racing release observe the conflict.
#[derive(Debug, Clone)]
pub struct TableClaim {
    pub table: DiningTable,
    pub expected_version: u64,
}

/// Storage interface the core needs, nothing more
///
/// Versioned updates take the version the caller read; the store assigns
/// `expected + 1` on success and fails with [`StoreError::VersionConflict`]
/// on mismatch. Reads are scoped by `store_id`: a record under another
/// tenant is indistinguishable from a missing one.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ==================== Categories ====================
    async fn put_category(&self, category: &Category) -> StoreResult<()>;
    async fn list_categories(&self, store_id: &str) -> StoreResult<Vec<Category>>;

    // ==================== Menu items ====================
    async fn put_menu_item(&self, item: &MenuItem) -> StoreResult<()>;
    async fn get_menu_item(&self, store_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>>;
    async fn list_menu_items(&self, store_id: &str) -> StoreResult<Vec<MenuItem>>;

    // ==================== Outlet overrides ====================
    /// Upsert on the unique (outlet, item) pair
    async fn upsert_override(&self, ov: &OutletMenuOverride) -> StoreResult<()>;
    async fn delete_override(&self, outlet_id: &str, item_id: &str) -> StoreResult<bool>;
    async fn get_override(
        &self,
        outlet_id: &str,
        item_id: &str,
    ) -> StoreResult<Option<OutletMenuOverride>>;
    async fn list_overrides(&self, outlet_id: &str) -> StoreResult<Vec<OutletMenuOverride>>;

    // ==================== Outlets ====================
    async fn put_outlet(&self, outlet: &Outlet) -> StoreResult<()>;
    async fn get_outlet(&self, store_id: &str, outlet_id: &str) -> StoreResult<Option<Outlet>>;

    // ==================== Tables ====================
    async fn put_table(&self, table: &DiningTable) -> StoreResult<()>;
    async fn get_table(&self, store_id: &str, table_id: &str)
    -> StoreResult<Option<DiningTable>>;
    /// Versioned table update
    async fn update_table(&self, table: &DiningTable, expected_version: u64) -> StoreResult<()>;

    // ==================== Orders ====================
    /// Atomically persist an order, its lines, and the optional table claim
    async fn insert_order(
        &self,
        order: &Order,
        lines: &[OrderLine],
        claim: Option<TableClaim>,
    ) -> StoreResult<()>;
    async fn get_order(&self, store_id: &str, order_id: &str) -> StoreResult<Option<Order>>;
    async fn list_order_lines(&self, order_id: &str) -> StoreResult<Vec<OrderLine>>;
    async fn list_orders_for_table(
        &self,
        store_id: &str,
        table_id: &str,
    ) -> StoreResult<Vec<Order>>;
    /// Orders in `status` created strictly before `cutoff` (epoch millis)
    async fn list_orders_created_before(
        &self,
        store_id: &str,
        status: OrderStatus,
        cutoff: i64,
    ) -> StoreResult<Vec<Order>>;
    /// Versioned order update
    async fn update_order(&self, order: &Order, expected_version: u64) -> StoreResult<()>;
}
