//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table status
///
/// `Occupied` is a summary of the table's orders, never authored directly.
/// `Reserved` and `NeedsCleaning` are the only manually assigned states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    NeedsCleaning,
}

impl TableStatus {
    /// True for the states staff assign by hand
    pub fn is_manual(self) -> bool {
        matches!(self, TableStatus::Reserved | TableStatus::NeedsCleaning)
    }
}

/// Manually assignable table state
///
/// Separate from [`TableStatus`] so handlers cannot request `occupied`
/// or `available` through the manual path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManualTableStatus {
    Reserved,
    NeedsCleaning,
}

impl From<ManualTableStatus> for TableStatus {
    fn from(status: ManualTableStatus) -> Self {
        match status {
            ManualTableStatus::Reserved => TableStatus::Reserved,
            ManualTableStatus::NeedsCleaning => TableStatus::NeedsCleaning,
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub store_id: String,
    pub outlet_id: String,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub is_active: bool,
    /// Optimistic concurrency counter, assigned by the record store
    pub version: u64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub capacity: Option<i32>,
}
