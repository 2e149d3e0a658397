//! UseCase: クライアント切断処理
//!
//! 全ルームから切断した接続を取り除き、空になったルームを削除してから
//! ConnectionDirectory の登録を解除します。残った参加者への通知は行いません。

use std::sync::Arc;

use crate::domain::{ConnectionDirectory, ConnectionId, RoomName, SessionRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// SessionRegistry（ルームの管理）
    registry: Arc<dyn SessionRegistry>,
    /// ConnectionDirectory（生存中の接続の管理）
    directory: Arc<dyn ConnectionDirectory>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, directory: Arc<dyn ConnectionDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 削除された（Closed になった）ルーム名のリスト
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        let closed_rooms = self.registry.remove_connection(connection_id).await;
        self.directory.unregister(connection_id).await;

        for room in &closed_rooms {
            tracing::info!("Room '{}' closed with no members left", room);
        }
        tracing::info!(
            "Connection '{}' disconnected ({} live)",
            connection_id,
            self.directory.count().await
        );
        closed_rooms
    }
}
