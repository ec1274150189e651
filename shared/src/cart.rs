//! Client-held cart
//!
//! The cart lives on the client until checkout; nothing here is persisted.
//! Prices are intentionally absent: the engine snapshots effective prices
//! at order creation, never trusting client-side amounts.

use serde::{Deserialize, Serialize};

/// One pre-order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub menu_item_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Pre-order list of line items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line; merges quantity into an existing line with the same
    /// item and notes.
    pub fn add_line(&mut self, menu_item_id: impl Into<String>, quantity: i32, notes: Option<String>) {
        let menu_item_id = menu_item_id.into();
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.menu_item_id == menu_item_id && l.notes == notes)
        {
            existing.quantity += quantity;
            return;
        }
        self.lines.push(CartLine {
            menu_item_id,
            quantity,
            notes,
        });
    }

    /// Remove every line for the given item; returns true if any was removed
    pub fn remove_item(&mut self, menu_item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
        self.lines.len() != before
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_quantity(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
