use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// How the customer pays for an order.
///
/// Known modes are matched case-insensitively. Anything else the completion
/// service produces is kept verbatim in [`PaymentMode::Other`] rather than
/// being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    Upi,
    Card,
    Other(String),
}

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::Other(raw) => raw,
        }
    }
}

impl From<&str> for PaymentMode {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "cash" => PaymentMode::Cash,
            "upi" => PaymentMode::Upi,
            "card" => PaymentMode::Card,
            _ => PaymentMode::Other(trimmed.to_string()),
        }
    }
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // null is treated the same as a missing field
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(PaymentMode::from).unwrap_or_default())
    }
}
