//! Table occupancy
//!
//! A table's status is a summary of its orders' payment state, not an
//! independently authored field. The one hard rule of the whole system
//! lives here: a table is never marked available while money is owed on
//! it.

pub mod error;
pub mod manager;
pub mod occupancy;

pub use error::{TableError, TableResult};
pub use manager::TablesManager;
