//! サーバーからクライアントへ送るイベント
//!
//! ワイヤ形式への変換は Infrastructure 層（`infrastructure::dto`）が担う。

use serde_json::{Map, Value};

use super::{
    entity::{Participant, ScoredItem},
    value_object::{ConnectionId, Timestamp},
};

/// フレンドリクエストに添えられた任意のフィールド（宛先 `id` を除く）
pub type FriendRequestFields = Map<String, Value>;

/// `waiting` イベントのメッセージ
pub const WAITING_MESSAGE: &str = "Waiting for other user";

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// 接続直後に本人へ通知する接続 ID
    Connected {
        connection_id: ConnectionId,
        connected_at: Timestamp,
    },
    FriendRequestReceived {
        from: ConnectionId,
        fields: FriendRequestFields,
    },
    FriendRequestAccepted {
        from: ConnectionId,
    },
    FriendRequestRejected {
        from: ConnectionId,
    },
    Waiting {
        message: String,
    },
    RoomReady {
        participants: Vec<Participant>,
    },
    MatchResult {
        items: Vec<ScoredItem>,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// ワイヤ上のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::FriendRequestReceived { .. } => "friendRequestReceived",
            ServerEvent::FriendRequestAccepted { .. } => "friendRequestAccepted",
            ServerEvent::FriendRequestRejected { .. } => "friendRequestRejected",
            ServerEvent::Waiting { .. } => "waiting",
            ServerEvent::RoomReady { .. } => "roomReady",
            ServerEvent::MatchResult { .. } => "matchResult",
            ServerEvent::Error { .. } => "error",
        }
    }

    pub fn waiting() -> Self {
        ServerEvent::Waiting {
            message: WAITING_MESSAGE.to_string(),
        }
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        ServerEvent::Error {
            message: err.to_string(),
        }
    }
}
