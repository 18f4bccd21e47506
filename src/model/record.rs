use serde::{Deserialize, Serialize};

/// Status written for every newly recorded line item.
pub const INITIAL_STATUS: &str = "Pending";

/// One sheet row read back as a flattened order line.
///
/// `id` is the 1-based position of the row among the data rows, so it changes
/// whenever rows are inserted or removed above it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: usize,
    pub timestamp: String,
    pub item: String,
    pub quantity: String,
    pub unit: String,
    pub price: String,
    pub total_price: String,
    pub customer_name: String,
    pub status: String,
    pub payment_mode: String,
}

impl OrderRecord {
    /// Maps a row by column position. Absent columns become empty strings.
    pub fn from_row(id: usize, row: &[String]) -> Self {
        let col = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            id,
            timestamp: col(0),
            item: col(1),
            quantity: col(2),
            unit: col(3),
            price: col(4),
            total_price: col(5),
            customer_name: col(6),
            status: col(7),
            payment_mode: col(8),
        }
    }
}
