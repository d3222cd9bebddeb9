//! Order load/save workflow
//!
//! The service owns the working order list. Every change to the list is
//! written through to the cache so a restart sees the same data.

use crate::{ClientError, ClientResult, OrderApi, OrderCache};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderUpdate};

/// Where the working list came from after [`OrderService::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fetched from the service, cache refreshed
    Fresh,
    /// Service unreachable, cached data kept
    Cached { reason: String },
}

impl LoadOutcome {
    /// Notice for the admin, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            LoadOutcome::Fresh => None,
            LoadOutcome::Cached { .. } => {
                Some("Failed to fetch orders, using local data if available")
            }
        }
    }
}

/// Result of [`OrderService::save`]
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Service accepted the edit
    Saved { order: Order },
    /// Service rejected the edit or was unreachable; the edit is kept locally
    SavedLocally { order: Order, reason: String },
}

impl SaveOutcome {
    pub fn order(&self) -> &Order {
        match self {
            SaveOutcome::Saved { order } | SaveOutcome::SavedLocally { order, .. } => order,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }

    /// Message shown to the admin
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Saved { order } => {
                format!("Order {} saved successfully", order.order_number)
            }
            SaveOutcome::SavedLocally { reason, .. } => {
                format!("Failed to save to server: {}. Saved locally.", reason)
            }
        }
    }
}

/// Orders workflow over a remote API and a local cache
pub struct OrderService<A, C> {
    api: A,
    cache: C,
    orders: Vec<Order>,
}

impl<A: OrderApi, C: OrderCache> OrderService<A, C> {
    pub fn new(api: A, cache: C) -> Self {
        Self {
            api,
            cache,
            orders: Vec::new(),
        }
    }

    /// Working order list
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Show cached orders, then replace them with the service's list.
    ///
    /// A failed fetch is not an error: the cached list stays in place. Only
    /// cache failures are returned.
    pub async fn load(&mut self) -> ClientResult<LoadOutcome> {
        let cached = self.cache.load().await?;
        if !cached.is_empty() {
            self.orders = cached;
        }
        self.refresh().await
    }

    async fn refresh(&mut self) -> ClientResult<LoadOutcome> {
        match self.api.list_orders().await {
            Ok(orders) => {
                self.cache.store(&orders).await?;
                tracing::info!(count = orders.len(), "Orders fetched");
                self.orders = orders;
                Ok(LoadOutcome::Fresh)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch orders, using cached data");
                self.orders = self.cache.load().await?;
                Ok(LoadOutcome::Cached {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Save an edit of order `id`.
    ///
    /// The id must be set, every editable field non-blank and the order
    /// present in the working list; otherwise nothing is sent or changed.
    /// When the service fails the edit is applied locally instead.
    pub async fn save(&mut self, id: &str, update: &OrderUpdate) -> ClientResult<SaveOutcome> {
        if id.trim().is_empty() {
            return Err(AppError::with_message(ErrorCode::RequiredField, "Order ID is missing").into());
        }
        let missing = update.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::new(ErrorCode::OrderFieldsIncomplete)
                .with_detail("fields", missing)
                .into());
        }
        let Some(index) = self.orders.iter().position(|o| o.id == id) else {
            return Err(AppError::new(ErrorCode::OrderNotFound)
                .with_detail("id", id)
                .into());
        };

        let remote = match self.api.update_order(id, update).await {
            Ok(body) => merge_order(&self.orders[index], body),
            Err(e) => Err(e),
        };

        match remote {
            Ok(order) => {
                self.orders[index] = order.clone();
                self.cache.store(&self.orders).await?;
                tracing::info!(id, order_number = %order.order_number, "Order saved");
                self.refresh().await?;
                Ok(SaveOutcome::Saved { order })
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Order save failed, keeping edit locally");
                self.orders[index].apply(update);
                self.cache.store(&self.orders).await?;
                Ok(SaveOutcome::SavedLocally {
                    order: self.orders[index].clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Overlay the service's response fields on the local order
fn merge_order(base: &Order, body: Value) -> ClientResult<Order> {
    let Value::Object(patch) = body else {
        return Err(ClientError::InvalidResponse(
            "Expected an order object".into(),
        ));
    };
    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(patch);
    }
    serde_json::from_value(merged).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_unsent_fields() {
        let base = Order {
            id: "a1".into(),
            order_number: "7".into(),
            location: "Pune".into(),
            ..Default::default()
        };
        let merged = merge_order(&base, json!({"orderNumber": 8, "status": "Paid"})).unwrap();
        assert_eq!(merged.id, "a1");
        assert_eq!(merged.order_number, "8");
        assert_eq!(merged.status, "Paid");
        assert_eq!(merged.location, "Pune");
    }

    #[test]
    fn test_merge_rejects_non_objects() {
        let err = merge_order(&Order::default(), json!([1, 2])).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_messages() {
        let order = Order {
            order_number: "1042".into(),
            ..Default::default()
        };
        let saved = SaveOutcome::Saved {
            order: order.clone(),
        };
        assert_eq!(saved.message(), "Order 1042 saved successfully");
        let local = SaveOutcome::SavedLocally {
            order,
            reason: "Invalid API key".into(),
        };
        assert_eq!(
            local.message(),
            "Failed to save to server: Invalid API key. Saved locally."
        );
        assert!(!local.is_remote());
    }
}
