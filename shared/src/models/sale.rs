//! Sale Model

use serde::{Deserialize, Serialize};

/// Line item on a sale; unit price is frozen at time of sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Sale entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    /// Sale date (YYYY-MM-DD)
    pub date: String,
    /// Customer reference; the display name is joined at render time
    pub customer_id: i64,
    pub items: Vec<SaleLine>,
    /// Sum of line subtotals, rounded to 2 decimal places
    pub total: f64,
    pub payment_method: String,
    pub status: String,
}

/// Update sale payload (fields left `None` are retained)
///
/// Line items are frozen once recorded; only the descriptive fields can be
/// patched. Stock and customer accumulators are not recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub date: Option<String>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
}

/// Record sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer_id: i64,
    pub items: Vec<SaleLine>,
    /// Defaults to the current day when absent
    pub date: Option<String>,
    pub payment_method: String,
    /// Defaults to "Completed" when absent
    pub status: Option<String>,
}
