//! Inventory Item Model

use serde::{Deserialize, Serialize};

/// Inventory item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    /// Free-form category (e.g. "Feed", "Medicine", "Crop Care")
    pub category: String,
    pub sku: Option<String>,
    /// Unit price
    pub price: f64,
    /// Units on hand; decremented by sales, not clamped at zero
    pub quantity: i64,
    /// Low-stock threshold
    pub reorder_level: i64,
    pub supplier: Option<String>,
    pub description: Option<String>,
    /// Refreshed on every mutation (YYYY-MM-DD)
    pub last_updated: String,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: String,
    pub sku: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub reorder_level: i64,
    pub supplier: Option<String>,
    pub description: Option<String>,
}

/// Update inventory item payload (fields left `None` are retained)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub reorder_level: Option<i64>,
    pub supplier: Option<String>,
    pub description: Option<String>,
}
