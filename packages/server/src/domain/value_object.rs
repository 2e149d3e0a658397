//! Value Object 定義
//!
//! 識別子やタイムスタンプなど、値そのものが意味を持つ不変オブジェクト。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続 ID（接続ごとに一意、再接続で振り直される）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空文字列は不可）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ConnectionId の生成器
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 から新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// ルーム名（クライアントが指定する任意の文字列）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザー ID（クライアント申告値。一意性・真正性は検証しない）
///
/// 数値・文字列のどちらも受け付け、受け取った形のまま送り返す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        UserId::Text(value.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(number) => write!(f, "{}", number),
            UserId::Text(text) => f.write_str(text),
        }
    }
}

/// アイテム ID（数値・文字列のどちらも受け付ける）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列・空白のみの ConnectionId は作成できない
        // given (前提条件):
        let empty = String::new();
        let blank = "   ".to_string();

        // when (操作):
        let result_empty = ConnectionId::new(empty);
        let result_blank = ConnectionId::try_from(blank);

        // then (期待する結果):
        assert_eq!(result_empty, Err(ValueObjectError::EmptyConnectionId));
        assert_eq!(result_blank, Err(ValueObjectError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn test_item_id_accepts_number_and_text() {
        // テスト項目: ItemId は数値と文字列の両方をデシリアライズできる
        // given (前提条件):
        let number = "550";
        let text = "\"tt0137523\"";

        // when (操作):
        let number_id: ItemId = serde_json::from_str(number).unwrap();
        let text_id: ItemId = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(number_id, ItemId::Number(550));
        assert_eq!(text_id, ItemId::Text("tt0137523".to_string()));
    }

    #[test]
    fn test_user_id_keeps_its_wire_shape() {
        // テスト項目: UserId は数値・文字列のどちらも受け付け、同じ形でシリアライズされる
        // given (前提条件):
        let number = "42";
        let text = "\"alice\"";

        // when (操作):
        let number_id: UserId = serde_json::from_str(number).unwrap();
        let text_id: UserId = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(number_id, UserId::Number(42));
        assert_eq!(text_id, UserId::new("alice"));
        assert_eq!(serde_json::to_string(&number_id).unwrap(), "42");
        assert_eq!(serde_json::to_string(&text_id).unwrap(), "\"alice\"");
        assert_eq!(number_id.to_string(), "42");
    }
}
