//! HTTP client for the orders service

use crate::{ClientError, ClientResult, OrdersConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{Order, OrderUpdate};
use std::time::Duration;

/// Header carrying the service API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Error body returned by the service
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Remote order storage
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// `GET /api/orders`
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    /// `PUT /api/orders/{id}`
    ///
    /// Returns the raw JSON the service answered with; it may hold only part
    /// of the order and is merged over the local copy by the caller.
    async fn update_order(&self, id: &str, update: &OrderUpdate) -> ClientResult<Value>;
}

/// Network orders client
#[derive(Debug, Clone)]
pub struct NetworkOrderClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NetworkOrderClient {
    pub fn new(config: &OrdersConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL without the trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_key(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header(API_KEY_HEADER, key),
            None => req,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            tracing::debug!(status = status.as_u16(), body = %text, "Orders API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl OrderApi for NetworkOrderClient {
    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let url = format!("{}/api/orders", self.base_url);
        let response = self.with_key(self.client.get(&url)).send().await?;
        let orders: Option<Vec<Order>> = self
            .handle_response(response, "Failed to fetch orders")
            .await?;
        Ok(orders.unwrap_or_default())
    }

    async fn update_order(&self, id: &str, update: &OrderUpdate) -> ClientResult<Value> {
        let url = format!("{}/api/orders/{}", self.base_url, id);
        let response = self
            .with_key(self.client.put(&url).json(update))
            .send()
            .await?;
        self.handle_response(response, "Failed to save order to database")
            .await
    }
}
