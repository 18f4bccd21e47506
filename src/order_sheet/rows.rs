//! Conversion between orders and sheet rows.
use crate::model::{Order, OrderRecord, INITIAL_STATUS};
use crate::services::Row;
use serde_json::Value;

/// Timestamp format written to column A.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One storage row per line item, all stamped with `timestamp`.
pub fn order_rows(order: &Order, timestamp: &str) -> Vec<Row> {
    order
        .items
        .iter()
        .map(|line| {
            vec![
                Value::from(timestamp),
                Value::from(line.item.as_str()),
                Value::from(line.quantity),
                Value::from(line.unit.as_str()),
                Value::from(line.price),
                Value::from(line.total_price),
                Value::from(order.customer_name.as_str()),
                Value::from(INITIAL_STATUS),
                Value::from(order.payment_mode.as_str()),
            ]
        })
        .collect()
}

/// Skips the header row and numbers the remaining rows from 1.
pub fn records_from(rows: &[Vec<String>]) -> Vec<OrderRecord> {
    rows.iter()
        .skip(1)
        .enumerate()
        .map(|(index, row)| OrderRecord::from_row(index + 1, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, PaymentMode};
    use serde_json::json;

    #[test]
    fn test_row_layout() {
        let order = Order {
            customer_name: "Ravi".to_string(),
            payment_mode: PaymentMode::Other("Cheque".to_string()),
            items: vec![LineItem::new("Prawns", 0.5, "kg", 550.0)],
        };

        let rows = order_rows(&order, "2026-03-01 12:00:00");

        assert_eq!(
            rows,
            vec![vec![
                json!("2026-03-01 12:00:00"),
                json!("Prawns"),
                json!(0.5),
                json!("kg"),
                json!(550.0),
                json!(275.0),
                json!("Ravi"),
                json!("Pending"),
                json!("Cheque"),
            ]]
        );
    }

    #[test]
    fn test_records_are_numbered_from_one() {
        let rows = vec![
            vec!["header".to_string()],
            vec!["t1".to_string(), "Chicken".to_string()],
            vec!["t2".to_string(), "Fish".to_string()],
        ];

        let records = records_from(&rows);

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(records[1].item, "Fish");
    }

    #[test]
    fn test_empty_range_yields_no_records() {
        assert!(records_from(&[]).is_empty());
        assert!(records_from(&[vec!["header".to_string()]]).is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
