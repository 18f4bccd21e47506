//! The order data contract shared by the extractor and the order sheet.
//!
//! Completion output is parsed in two steps. [`ExtractedOrder`] is what the
//! extractor hands back: header fields are coerced, but `items` is kept as raw
//! JSON. [`Order`] is produced from it with `TryFrom`, which is where a
//! missing, non-array or empty `items` is rejected.
use crate::model::PaymentMode;
use serde::{Deserialize, Deserializer, Serialize};

/// One purchased good within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLineItem")]
pub struct LineItem {
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    /// As reported by the completion service. Only computed when absent.
    pub total_price: f64,
}

impl LineItem {
    pub fn new(item: impl Into<String>, quantity: f64, unit: impl Into<String>, price: f64) -> Self {
        Self {
            item: item.into(),
            quantity,
            unit: unit.into(),
            price,
            total_price: quantity * price,
        }
    }
}

#[derive(Deserialize)]
struct RawLineItem {
    #[serde(deserialize_with = "null_as_default")]
    item: String,
    #[serde(deserialize_with = "lenient_number")]
    quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    unit: String,
    #[serde(deserialize_with = "lenient_number")]
    price: f64,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    total_price: Option<f64>,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        Self {
            total_price: raw.total_price.unwrap_or(raw.quantity * raw.price),
            item: raw.item,
            quantity: raw.quantity,
            unit: raw.unit,
            price: raw.price,
        }
    }
}

/// The extractor's result, before the caller validates `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedOrder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub items: serde_json::Value,
}

/// A validated customer order with at least one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub payment_mode: PaymentMode,
    pub items: Vec<LineItem>,
}

impl TryFrom<ExtractedOrder> for Order {
    type Error = String;

    fn try_from(extracted: ExtractedOrder) -> Result<Self, Self::Error> {
        let raw_items = match extracted.items {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Null => return Err("order has no items".to_string()),
            _ => return Err("order items must be a list".to_string()),
        };
        if raw_items.is_empty() {
            return Err("order has no items".to_string());
        }

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<LineItem>(raw)
                    .map_err(|e| format!("item {} is invalid: {}", index + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            customer_name: extracted.customer_name,
            payment_mode: extracted.payment_mode,
            items,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_number<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::custom(format!("expected a number, got {:?}", text))),
        }
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    NumberOrText::deserialize(deserializer)?.into_number()
}

fn lenient_optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_number)
        .transpose()
}

fn null_as_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extracted(items: serde_json::Value) -> ExtractedOrder {
        ExtractedOrder {
            customer_name: "Ravi".to_string(),
            payment_mode: PaymentMode::Upi,
            items,
        }
    }

    #[test]
    fn test_missing_header_fields_take_defaults() {
        let parsed: ExtractedOrder = serde_json::from_str(r#"{"customer_name": null}"#).unwrap();
        assert_eq!(parsed.customer_name, "");
        assert_eq!(parsed.payment_mode, PaymentMode::Cash);
        assert!(parsed.items.is_null());
    }

    #[test]
    fn test_valid_items_become_order() {
        let order = Order::try_from(extracted(json!([
            {"item": "Chicken", "quantity": 2, "unit": "kg", "price": 240, "total_price": 480}
        ])))
        .unwrap();

        assert_eq!(order.customer_name, "Ravi");
        assert_eq!(order.items, vec![LineItem::new("Chicken", 2.0, "kg", 240.0)]);
    }

    #[test]
    fn test_reported_total_is_trusted() {
        let order = Order::try_from(extracted(json!([
            {"item": "Mutton", "quantity": 1, "unit": "kg", "price": 800, "total_price": 750}
        ])))
        .unwrap();
        assert_eq!(order.items[0].total_price, 750.0);
    }

    #[test]
    fn test_absent_total_is_computed() {
        let order = Order::try_from(extracted(json!([
            {"item": "Eggs", "quantity": "12", "unit": "piece", "price": "7.5"}
        ])))
        .unwrap();
        assert_eq!(order.items[0].quantity, 12.0);
        assert_eq!(order.items[0].total_price, 90.0);
    }

    #[test]
    fn test_non_finite_text_numbers_rejected() {
        for (field, text) in [("price", "NaN"), ("quantity", "inf"), ("total_price", "-Infinity")] {
            let mut item = json!({"item": "Fish", "quantity": 1, "unit": "kg", "price": 350});
            item[field] = json!(text);

            let err = Order::try_from(extracted(json!([item]))).unwrap_err();
            assert!(err.starts_with("item 1 is invalid"), "{field}={text}: {err}");
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = Order::try_from(extracted(json!([]))).unwrap_err();
        assert!(err.contains("no items"));
    }

    #[test]
    fn test_missing_items_rejected() {
        assert!(Order::try_from(extracted(serde_json::Value::Null)).is_err());
    }

    #[test]
    fn test_non_array_items_rejected() {
        let err = Order::try_from(extracted(json!({"item": "Chicken"}))).unwrap_err();
        assert!(err.contains("must be a list"));
    }

    #[test]
    fn test_item_without_price_rejected() {
        let err = Order::try_from(extracted(json!([{"item": "Fish", "quantity": 1}]))).unwrap_err();
        assert!(err.starts_with("item 1 is invalid"));
    }
}
