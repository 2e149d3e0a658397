//! UseCase: クライアント接続処理
//!
//! 新しい接続を ConnectionDirectory に登録し、本人に接続 ID を通知します。

use std::sync::Arc;

use futari_shared::time::Clock;

use crate::domain::{
    ConnectionDirectory, ConnectionId, MessagePusher, PusherChannel, ServerEvent, Timestamp,
};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// ConnectionDirectory（生存中の接続の管理）
    directory: Arc<dyn ConnectionDirectory>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録し、`connected` イベントを本人に送る
    ///
    /// # Returns
    ///
    /// 接続時刻（Domain Model）
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> Timestamp {
        let connected_at = Timestamp::new(self.clock.now_jst_millis());
        self.directory.register(connection_id.clone(), sender).await;

        let event = ServerEvent::Connected {
            connection_id: connection_id.clone(),
            connected_at,
        };
        self.message_pusher.push_to(&connection_id, &event).await;

        tracing::info!(
            "Connection '{}' established ({} live)",
            connection_id,
            self.directory.count().await
        );
        connected_at
    }
}
