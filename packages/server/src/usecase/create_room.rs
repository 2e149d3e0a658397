//! UseCase: ルーム作成処理
//!
//! 同名のルームがあっても無条件に置き換え（後勝ち）、作成者 1 人の Waiting 状態にします。

use std::sync::Arc;

use futari_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, RoomName, ServerEvent, SessionRegistry, Timestamp,
    UserId,
};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// SessionRegistry（ルームの管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// ルーム作成を実行し、作成者に `waiting` を送る
    ///
    /// # Returns
    ///
    /// 同名ルームの置き換えで追い出された参加者
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        user_id: UserId,
    ) -> Vec<Participant> {
        let now = Timestamp::new(self.clock.now_jst_millis());
        let creator = Participant::new(connection_id.clone(), user_id, now);
        let displaced = self.registry.create_room(room.clone(), creator, now).await;

        if displaced.is_empty() {
            tracing::info!("Room '{}' created by '{}'", room, connection_id);
        } else {
            tracing::warn!(
                "Room '{}' re-created by '{}', discarding {} previous member(s)",
                room,
                connection_id,
                displaced.len()
            );
        }

        self.message_pusher
            .push_to(&connection_id, &ServerEvent::waiting())
            .await;
        displaced
    }
}
