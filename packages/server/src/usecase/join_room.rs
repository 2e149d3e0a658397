//! UseCase: ルーム参加処理
//!
//! 存在しないルーム・満員のルームへの参加は、呼び出し元にだけ `error` を返します。
//! 2 人目が参加したらルーム全体に `roomReady` をブロードキャストします。

use std::sync::Arc;

use futari_shared::time::{Clock, elapsed_millis};

use crate::domain::{
    ConnectionId, MessagePusher, Participant, ROOM_CAPACITY, RoomError, RoomName, ServerEvent,
    SessionRegistry, Timestamp, UserId,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// SessionRegistry（ルームの管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Participant>)` - 参加後の参加者リスト（参加順）
    /// * `Err(RoomError)` - 参加失敗（呼び出し元には `error` 送信済み）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        user_id: UserId,
    ) -> Result<Vec<Participant>, RoomError> {
        let now = Timestamp::new(self.clock.now_jst_millis());
        let participant = Participant::new(connection_id.clone(), user_id, now);

        let members = match self.registry.join_room(&room, participant).await {
            Ok(members) => members,
            Err(e) => {
                tracing::info!("'{}' could not join room '{}': {}", connection_id, room, e);
                self.message_pusher
                    .push_to(&connection_id, &ServerEvent::error(&e))
                    .await;
                return Err(e);
            }
        };

        if members.len() == ROOM_CAPACITY {
            let waited = elapsed_millis(members[0].joined_at.value(), now.value());
            tracing::info!("Room '{}' is ready after {}ms", room, waited);

            let targets = members.iter().map(|p| p.connection_id.clone()).collect();
            let event = ServerEvent::RoomReady {
                participants: members.clone(),
            };
            self.message_pusher.broadcast(targets, &event).await;
        } else {
            // ラウンド終了後の空ルームに最初に戻ってきた参加者
            tracing::info!("'{}' rejoined empty room '{}'", connection_id, room);
            self.message_pusher
                .push_to(&connection_id, &ServerEvent::waiting())
                .await;
        }

        Ok(members)
    }
}
