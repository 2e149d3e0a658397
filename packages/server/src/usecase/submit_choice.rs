//! UseCase: 選択の送信と集計
//!
//! 2 人分の選択が揃った時点で 1 回だけ集計し、`matchResult` をルーム全体に
//! ブロードキャストします。ルームの参加者リストは空になり（エントリは残る）、
//! 次のラウンドには改めて参加し直す必要があります。
//! 存在しないルームや非参加者からの送信は、呼び出し元にも通知せず無視します。

use std::sync::Arc;

use crate::domain::{
    Choice, ChoiceError, ChoiceProgress, ConnectionId, MessagePusher, RoomName, ScoredItem,
    ServerEvent, SessionRegistry, combine_and_rank,
};

/// 選択送信のユースケース
pub struct SubmitChoiceUseCase {
    /// SessionRegistry（ルームの管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SubmitChoiceUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 選択送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(_))` - このラウンドが完了し、ブロードキャストした集計結果
    /// * `Ok(None)` - 記録済み、相手の選択待ち
    /// * `Err(ChoiceError)` - 無視された送信
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: &RoomName,
        choice: Choice,
    ) -> Result<Option<Vec<ScoredItem>>, ChoiceError> {
        let progress = match self.registry.record_choice(room, connection_id, choice).await {
            Ok(progress) => progress,
            Err(e) => {
                tracing::debug!(
                    "Ignored choice from '{}' for room '{}': {}",
                    connection_id,
                    room,
                    e
                );
                return Err(e);
            }
        };

        let participants = match progress {
            ChoiceProgress::Pending => {
                tracing::info!("'{}' submitted a choice in room '{}'", connection_id, room);
                return Ok(None);
            }
            ChoiceProgress::Complete(participants) => participants,
        };

        let targets: Vec<ConnectionId> = participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect();
        let choices: Vec<Choice> = participants.into_iter().filter_map(|p| p.choice).collect();
        let ranked = combine_and_rank(&choices);

        tracing::info!(
            "Room '{}' resolved with {} ranked item(s)",
            room,
            ranked.len()
        );
        let event = ServerEvent::MatchResult {
            items: ranked.clone(),
        };
        self.message_pusher.broadcast(targets, &event).await;

        Ok(Some(ranked))
    }
}
