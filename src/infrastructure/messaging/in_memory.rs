use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::application::services::messenger::{MessengerClient, SendEndpoint};

#[derive(Debug, Clone)]
pub struct DeliveredMessage {
    pub delivery_id: Uuid,
    pub delivered_at: DateTime<Utc>,
    pub url: String,
    pub payload: Value,
}

/// Client that keeps every payload in memory instead of posting it.
#[derive(Default)]
pub struct InMemoryMessengerClient {
    deliveries: Arc<RwLock<Vec<DeliveredMessage>>>,
    rejection: Option<String>,
}

impl InMemoryMessengerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with `reason`, as if the platform refused it.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            rejection: Some(reason.into()),
            ..Self::default()
        }
    }

    pub async fn deliveries(&self) -> Vec<DeliveredMessage> {
        self.deliveries.read().await.clone()
    }
}

#[async_trait]
impl MessengerClient for InMemoryMessengerClient {
    async fn send(&self, endpoint: &SendEndpoint, payload: &Value) -> anyhow::Result<()> {
        if let Some(reason) = &self.rejection {
            anyhow::bail!("platform rejected message: {}", reason);
        }

        let delivery = DeliveredMessage {
            delivery_id: Uuid::new_v4(),
            delivered_at: Utc::now(),
            url: endpoint.url(),
            payload: payload.clone(),
        };
        debug!(delivery_id = %delivery.delivery_id, "recorded delivery");

        let mut deliveries = self.deliveries.write().await;
        deliveries.push(delivery);
        Ok(())
    }
}
