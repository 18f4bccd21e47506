//! # Order Sheet
//!
//! The write and read paths over tabular storage. Both work on a single named
//! range with this fixed column layout:
//!
//! | A | B | C | D | E | F | G | H | I |
//! |---|---|---|---|---|---|---|---|---|
//! | timestamp | item | quantity | unit | price | total_price | customer_name | status | payment_mode |
//!
//! The first row of the range is a header. Appends insert after existing data
//! and carry no dedup key, so a retried request records its rows twice.

pub mod rows;

use crate::model::{Order, OrderRecord};
use crate::services::{SheetStore, StorageError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Handle for appending and listing order rows.
#[derive(Clone)]
pub struct OrderSheet {
    store: Arc<dyn SheetStore>,
    range: String,
}

impl OrderSheet {
    pub fn new(store: Arc<dyn SheetStore>, range: impl Into<String>) -> Self {
        Self {
            store,
            range: range.into(),
        }
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    /// Appends one row per line item in a single storage call.
    ///
    /// Returns the number of rows written.
    #[instrument(skip(self, order), fields(range = %self.range))]
    pub async fn append_order(&self, order: &Order) -> Result<usize, StorageError> {
        let rows = rows::order_rows(order, &rows::timestamp_now());
        if rows.is_empty() {
            debug!("Order has no items, nothing to append");
            return Ok(0);
        }

        let count = rows.len();
        debug!(?rows, "Appending rows");
        self.store.append_rows(&self.range, rows).await?;
        info!(rows = count, customer = %order.customer_name, "Order appended");
        Ok(count)
    }

    /// Reads every data row back as a flattened record.
    #[instrument(skip(self), fields(range = %self.range))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, StorageError> {
        let rows = self.store.read_rows(&self.range).await?;
        let records = rows::records_from(&rows);
        info!(count = records.len(), "Orders listed");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, PaymentMode};
    use crate::services::mock::MockSheet;
    use serde_json::json;

    fn order() -> Order {
        Order {
            customer_name: "Ravi".to_string(),
            payment_mode: PaymentMode::Upi,
            items: vec![
                LineItem::new("Chicken", 2.0, "kg", 240.0),
                LineItem::new("Eggs", 12.0, "piece", 7.0),
            ],
        }
    }

    #[tokio::test]
    async fn test_append_sends_one_batch() {
        let mut mock = MockSheet::new();
        mock.expect_append().return_ok();
        let sheet = OrderSheet::new(mock.store(), "Orders!A:I");

        let written = sheet.append_order(&order()).await.unwrap();

        assert_eq!(written, 2);
        let appends = mock.appends();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0].range, "Orders!A:I");
        assert_eq!(appends[0].rows.len(), 2);
        assert_eq!(appends[0].rows[1][1], json!("Eggs"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_append_failure_is_reported() {
        let mut mock = MockSheet::new();
        mock.expect_append()
            .return_err(StorageError::Request("403 Forbidden".to_string()));
        let sheet = OrderSheet::new(mock.store(), "Sheet1!A:I");

        let result = sheet.append_order(&order()).await;

        assert_eq!(result, Err(StorageError::Request("403 Forbidden".to_string())));
    }

    #[tokio::test]
    async fn test_empty_order_skips_storage() {
        let mock = MockSheet::new();
        let sheet = OrderSheet::new(mock.store(), "Sheet1!A:I");
        let empty = Order {
            items: vec![],
            ..order()
        };

        assert_eq!(sheet.append_order(&empty).await.unwrap(), 0);
        assert!(mock.appends().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_header() {
        let mut mock = MockSheet::new();
        mock.expect_read().return_ok(vec![
            vec!["Timestamp", "Item", "Quantity", "Unit", "Price", "Total", "Customer", "Status", "Payment"],
            vec!["2026-01-01 09:30:00", "Mutton", "1", "kg", "800", "800", "Asha", "Pending", "Cash"],
        ]);
        let sheet = OrderSheet::new(mock.store(), "Sheet1!A:I");

        let records = sheet.list_orders().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].item, "Mutton");
        assert_eq!(mock.reads(), vec!["Sheet1!A:I".to_string()]);
    }
}
