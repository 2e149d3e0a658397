//! InMemory ConnectionDirectory 実装
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! ここでは生成された `UnboundedSender` を接続 ID と対応づけて保持するだけです。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionDirectory, ConnectionId, PusherChannel};

/// インメモリ ConnectionDirectory 実装
#[derive(Default)]
pub struct InMemoryConnectionDirectory {
    /// Key: 接続 ID, Value: 送信チャンネル
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl InMemoryConnectionDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionDirectory for InMemoryConnectionDirectory {
    async fn register(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered", connection_id);
        connections.insert(connection_id, channel);
    }

    async fn resolve(&self, connection_id: &ConnectionId) -> Option<PusherChannel> {
        let connections = self.connections.lock().await;
        connections
            .get(connection_id)
            .filter(|channel| !channel.is_closed())
            .cloned()
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unregistered", connection_id);
        }
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
