//! Entity 定義
//!
//! ルーム・参加者・選択内容・スコア付きアイテム。

use serde::Serialize;

use super::{
    error::{ChoiceError, RoomError},
    value_object::{ConnectionId, ItemId, RoomName, Timestamp, UserId},
};

/// 1 ルームに参加できる最大人数
pub const ROOM_CAPACITY: usize = 2;

/// クライアントが送ってくるアイテム（映画カード）。中身は検証しない。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub poster_image: Option<String>,
    pub year: Option<i32>,
}

/// 選択の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Liked,
    Disliked,
    Maybe,
}

impl Category {
    /// 分類ごとの加点
    pub fn score(self) -> u32 {
        match self {
            Category::Liked => 5,
            Category::Disliked => 0,
            Category::Maybe => 3,
        }
    }
}

/// 参加者 1 人分の選択内容
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub liked_items: Vec<Item>,
    pub disliked_items: Vec<Item>,
    pub maybe_items: Vec<Item>,
}

impl Choice {
    pub fn new(liked_items: Vec<Item>, disliked_items: Vec<Item>, maybe_items: Vec<Item>) -> Self {
        Self {
            liked_items,
            disliked_items,
            maybe_items,
        }
    }

    /// liked → disliked → maybe の順に (分類, アイテム) を列挙する
    pub fn categorized(&self) -> impl Iterator<Item = (Category, &Item)> {
        let liked = self.liked_items.iter().map(|item| (Category::Liked, item));
        let disliked = self
            .disliked_items
            .iter()
            .map(|item| (Category::Disliked, item));
        let maybe = self.maybe_items.iter().map(|item| (Category::Maybe, item));
        liked.chain(disliked).chain(maybe)
    }
}

/// 集計結果のアイテム
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub id: ItemId,
    pub title: String,
    pub poster_image: Option<String>,
    pub score: u32,
    pub year: Option<i32>,
}

/// ルームの参加者
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    /// 今ラウンドの選択（未送信なら None）
    pub choice: Option<Choice>,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, user_id: UserId, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            user_id,
            choice: None,
            joined_at,
        }
    }

    pub fn has_chosen(&self) -> bool {
        self.choice.is_some()
    }
}

/// ルームのライフサイクル上の状態
///
/// `Resolved` は結果をブロードキャストする一瞬の状態、`Closed` はレジストリから
/// エントリが消えた状態なので、どちらもここには現れない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// 参加者 0 人（ラウンド終了直後など）
    Empty,
    /// 参加者 1 人、2 人目を待機中
    Waiting,
    /// 参加者 2 人、選択待ち
    Ready,
}

/// 選択を記録した結果
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceProgress {
    /// まだ揃っていない
    Pending,
    /// 2 人分揃った。ルームからは取り除かれた参加者が返る
    Complete(Vec<Participant>),
}

/// ルーム（最大 2 人の参加者を持つ）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: RoomName,
    /// 参加順
    pub participants: Vec<Participant>,
    pub created_at: Timestamp,
}

impl Room {
    /// 作成者 1 人だけのルームを作成
    pub fn new(name: RoomName, creator: Participant, created_at: Timestamp) -> Self {
        Self {
            name,
            participants: vec![creator],
            created_at,
        }
    }

    pub fn phase(&self) -> RoomPhase {
        match self.participants.len() {
            0 => RoomPhase::Empty,
            1 => RoomPhase::Waiting,
            _ => RoomPhase::Ready,
        }
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= ROOM_CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// 参加者の接続 ID 一覧（参加順）
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    /// 参加者を末尾に追加
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }
        self.participants.push(participant);
        Ok(())
    }

    /// 指定の接続 ID を持つ参加者を全て取り除く。取り除いたら true
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.participants.len();
        self.participants
            .retain(|p| &p.connection_id != connection_id);
        self.participants.len() != before
    }

    /// 選択を記録し、2 人分揃ったら参加者リストを空にして返す
    pub fn record_choice(
        &mut self,
        connection_id: &ConnectionId,
        choice: Choice,
    ) -> Result<ChoiceProgress, ChoiceError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or(ChoiceError::NotARoomMember)?;

        if participant.has_chosen() {
            return Err(ChoiceError::AlreadySubmitted);
        }
        participant.choice = Some(choice);

        if self.is_full() && self.participants.iter().all(Participant::has_chosen) {
            return Ok(ChoiceProgress::Complete(std::mem::take(
                &mut self.participants,
            )));
        }
        Ok(ChoiceProgress::Pending)
    }
}
