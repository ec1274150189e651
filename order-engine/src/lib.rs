//! Outlet order & table lifecycle engine
//!
//! Core of a multi-tenant restaurant ordering platform. The engine owns
//! the rules with real invariants; everything around it (HTTP routing,
//! auth, persistence, payments) is a collaborator injected at the edges.
//!
//! # Module structure
//!
//! ```text
//! order-engine/src/
//! ├── catalog/       # Menu catalog + per-outlet override resolution
//! ├── pricing/       # Pure totals calculator
//! ├── orders/        # Order lifecycle state machine + manager
//! ├── tables/        # Table occupancy rules + manager
//! ├── payment/       # Payment collaborator interface
//! ├── store/         # Record store trait + in-memory binding
//! ├── common/        # Logging
//! └── config, tenant # Env config, tenant scoping context
//! ```
//!
//! # Data flow
//!
//! 1. A client submits its cart at checkout
//! 2. `OrdersManager` resolves effective prices, snapshots them into
//!    order lines, computes totals, and commits order + lines + table
//!    claim as one atomic store write
//! 3. Staff actions drive status transitions; the payment collaborator's
//!    callback drives payment status
//! 4. Table status is recomputed from the latest order set after every
//!    change; explicit release is guarded by the unpaid-orders rule

pub mod catalog;
pub mod common;
pub mod config;
pub mod orders;
pub mod payment;
pub mod pricing;
pub mod store;
pub mod tables;
pub mod tenant;

// Re-export public service types
pub use catalog::CatalogService;
pub use config::Config;
pub use orders::OrdersManager;
pub use tables::TablesManager;
pub use tenant::TenantContext;
