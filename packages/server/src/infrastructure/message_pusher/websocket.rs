//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ドメインイベントを JSON にシリアライズ
//! - ConnectionDirectory で宛先を解決し、`UnboundedSender` に流す（push_to, broadcast）
//!
//! 宛先が見つからない・切断済みの場合は `Delivery::Unreachable` を返すだけで、
//! エラーにはしない（at-most-once、再送なし）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{ConnectionDirectory, ConnectionId, Delivery, MessagePusher, ServerEvent},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let directory = Arc::new(InMemoryConnectionDirectory::new());
/// let pusher = WebSocketMessagePusher::new(directory.clone());
///
/// pusher.push_to(&connection_id, &ServerEvent::waiting()).await;
/// ```
pub struct WebSocketMessagePusher {
    directory: Arc<dyn ConnectionDirectory>,
}

impl WebSocketMessagePusher {
    pub fn new(directory: Arc<dyn ConnectionDirectory>) -> Self {
        Self { directory }
    }

    fn encode(event: &ServerEvent) -> Option<String> {
        match serde_json::to_string(&ServerMessage::from(event)) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize '{}' event: {}", event.name(), e);
                None
            }
        }
    }

    async fn deliver(&self, target: &ConnectionId, json: String) -> Delivery {
        let Some(channel) = self.directory.resolve(target).await else {
            return Delivery::Unreachable;
        };
        match channel.send(json) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Unreachable,
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(&self, target: &ConnectionId, event: &ServerEvent) -> Delivery {
        let Some(json) = Self::encode(event) else {
            return Delivery::Unreachable;
        };

        let delivery = self.deliver(target, json).await;
        match delivery {
            Delivery::Delivered => {
                tracing::debug!("Pushed '{}' to connection '{}'", event.name(), target)
            }
            Delivery::Unreachable => {
                tracing::debug!(
                    "Connection '{}' unreachable, dropped '{}'",
                    target,
                    event.name()
                )
            }
        }
        delivery
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ServerEvent) -> usize {
        let Some(json) = Self::encode(event) else {
            return 0;
        };

        let mut delivered = 0;
        for target in &targets {
            // ブロードキャストでは一部の送信失敗を許容
            if self.deliver(target, json.clone()).await.is_delivered() {
                delivered += 1;
            } else {
                tracing::warn!(
                    "Connection '{}' not reachable during '{}' broadcast, skipping",
                    target,
                    event.name()
                );
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} connections",
            event.name(),
            delivered,
            targets.len()
        );
        delivered
    }
}
