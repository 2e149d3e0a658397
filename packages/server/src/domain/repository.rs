//! SessionRegistry trait 定義
//!
//! ルーム名 → 参加者リストの対応を保持するデータストアへのインターフェース。
//! 各操作は 1 回のロックで完結し、途中の状態が他のイベントから見えることはない。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Choice, ChoiceProgress, Participant, Room},
    error::{ChoiceError, RoomError},
    value_object::{ConnectionId, RoomName, Timestamp},
};

#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// ルームを作成する。同名のルームがあれば作成者 1 人のリストで置き換える。
    ///
    /// 置き換えで追い出された参加者を返す。
    async fn create_room(
        &self,
        name: RoomName,
        creator: Participant,
        created_at: Timestamp,
    ) -> Vec<Participant>;

    /// 既存のルームに参加する。参加後の参加者リストを返す
    async fn join_room(
        &self,
        name: &RoomName,
        participant: Participant,
    ) -> Result<Vec<Participant>, RoomError>;

    /// 選択を記録する。2 人分揃ったら参加者リストを空にして（エントリは残す）返す
    async fn record_choice(
        &self,
        name: &RoomName,
        connection_id: &ConnectionId,
        choice: Choice,
    ) -> Result<ChoiceProgress, ChoiceError>;

    /// 全ルームから接続を取り除く。取り除いた後に空のルーム（ラウンド終了で
    /// 既に空だったものを含む）は削除し、その名前を返す
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<RoomName>;

    /// ルームのスナップショットを取得
    async fn get_room(&self, name: &RoomName) -> Option<Room>;

    /// 登録中のルーム数
    async fn count_rooms(&self) -> usize;
}
