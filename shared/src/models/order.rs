//! Customer order models
//!
//! Orders live in an external REST service. The admin table edits a flat set
//! of text fields, so every editable field is carried as a string even when
//! the service sends a number.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Customer order as returned by `GET /api/orders`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Service-side identifier
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_number: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub items: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub location: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub customer_number: String,
}

/// Editable order fields (`PUT /api/orders/{id}` body)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_number: String,
    pub date: String,
    pub items: String,
    pub amount: String,
    pub status: String,
    pub location: String,
    pub customer_name: String,
    pub customer_number: String,
}

impl Order {
    /// Parsed amount, if the amount field holds a number
    pub fn amount_value(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim()).ok()
    }

    /// Editable snapshot of this order (seeds the edit buffer)
    pub fn to_update(&self) -> OrderUpdate {
        OrderUpdate {
            order_number: self.order_number.clone(),
            date: self.date.clone(),
            items: self.items.clone(),
            amount: self.amount.clone(),
            status: self.status.clone(),
            location: self.location.clone(),
            customer_name: self.customer_name.clone(),
            customer_number: self.customer_number.clone(),
        }
    }

    /// Overwrite the editable fields, keeping the id
    pub fn apply(&mut self, update: &OrderUpdate) {
        self.order_number = update.order_number.clone();
        self.date = update.date.clone();
        self.items = update.items.clone();
        self.amount = update.amount.clone();
        self.status = update.status.clone();
        self.location = update.location.clone();
        self.customer_name = update.customer_name.clone();
        self.customer_number = update.customer_number.clone();
    }
}

impl OrderUpdate {
    /// Names of the fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("orderNumber", &self.order_number),
            ("date", &self.date),
            ("items", &self.items),
            ("amount", &self.amount),
            ("status", &self.status),
            ("location", &self.location),
            ("customerName", &self.customer_name),
            ("customerNumber", &self.customer_number),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

/// Deserialize a string, number, bool or null into a `String`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct FlexibleVisitor;

    impl<'de> Visitor<'de> for FlexibleVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(FlexibleVisitor)
}
