//! WebSocket event DTOs.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ItemId, UserId};

// ========================================
// Client → Server
// ========================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    SendFriendRequest(FriendRequestDto),
    AcceptFriendRequest(FriendResponseDto),
    RejectFriendRequest(FriendResponseDto),
    CreateRoom(RoomRequestDto),
    JoinRoom(RoomRequestDto),
    ChooseMovie(ChooseMovieDto),
}

/// `sendFriendRequest` payload: target id plus arbitrary request fields
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FriendRequestDto {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `acceptFriendRequest` / `rejectFriendRequest` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FriendResponseDto {
    pub id: String,
}

/// `createRoom` / `joinRoom` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequestDto {
    pub room: String,
    #[serde(alias = "userID")]
    pub user_id: UserId,
}

/// `chooseMovie` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseMovieDto {
    pub room: String,
    #[serde(default)]
    pub liked_cards: Vec<CardDto>,
    #[serde(default)]
    pub disliked_cards: Vec<CardDto>,
    #[serde(default)]
    pub maybe_cards: Vec<CardDto>,
}

/// A swiped card as supplied by the client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "image", alias = "poster")]
    pub poster_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_year))
}

/// Accepts `2020`, `"2020"` and `"2020-05-01"`; anything else is treated as unknown.
pub fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|year| i32::try_from(year).ok()),
        Value::String(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .take(4)
                .collect();
            if digits.len() == 4 {
                digits.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

// ========================================
// Server → Client
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    Connected(ConnectedDto),
    FriendRequestReceived(FriendRequestReceivedDto),
    FriendRequestAccepted(FriendResponseResultDto),
    FriendRequestRejected(FriendResponseResultDto),
    Waiting(String),
    RoomReady(Vec<RoomMemberDto>),
    MatchResult(Vec<ScoredCardDto>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedDto {
    pub connection_id: String,
    pub connected_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestReceivedDto {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub from_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponseResultDto {
    pub from_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberDto {
    pub connection_id: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCardDto {
    pub id: ItemId,
    pub title: String,
    pub poster_image: Option<String>,
    pub score: u32,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_choose_movie_with_missing_lists() {
        // テスト項目: chooseMovie で省略されたリストは空として扱われる
        // given (前提条件):
        let text = r#"{"event":"chooseMovie","data":{"room":"r1","likedCards":[{"id":550,"title":"Fight Club","image":"/fc.jpg","year":1999}]}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        let ClientMessage::ChooseMovie(dto) = message else {
            panic!("expected chooseMovie");
        };
        assert_eq!(dto.room, "r1");
        assert_eq!(dto.liked_cards.len(), 1);
        assert_eq!(dto.liked_cards[0].poster_image.as_deref(), Some("/fc.jpg"));
        assert_eq!(dto.liked_cards[0].year, Some(1999));
        assert!(dto.disliked_cards.is_empty());
        assert!(dto.maybe_cards.is_empty());
    }

    #[test]
    fn test_parse_create_room_accepts_user_id_alias() {
        // テスト項目: userId と userID のどちらでも受け付ける
        // given (前提条件):
        let camel = r#"{"event":"createRoom","data":{"room":"r1","userId":"u1"}}"#;
        let upper = r#"{"event":"joinRoom","data":{"room":"r1","userID":"u2"}}"#;

        // when (操作):
        let camel: ClientMessage = serde_json::from_str(camel).unwrap();
        let upper: ClientMessage = serde_json::from_str(upper).unwrap();

        // then (期待する結果):
        assert_eq!(
            camel,
            ClientMessage::CreateRoom(RoomRequestDto {
                room: "r1".to_string(),
                user_id: UserId::new("u1"),
            })
        );
        assert_eq!(
            upper,
            ClientMessage::JoinRoom(RoomRequestDto {
                room: "r1".to_string(),
                user_id: UserId::new("u2"),
            })
        );
    }

    #[test]
    fn test_parse_room_request_accepts_numeric_user_id() {
        // テスト項目: 数値のユーザー ID もそのまま受け付ける
        // given (前提条件):
        let text = r#"{"event":"createRoom","data":{"room":"r1","userID":42}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::CreateRoom(RoomRequestDto {
                room: "r1".to_string(),
                user_id: UserId::Number(42),
            })
        );
    }

    #[test]
    fn test_parse_friend_request_keeps_extra_fields() {
        // テスト項目: sendFriendRequest の宛先以外のフィールドがそのまま保持される
        // given (前提条件):
        let text = r#"{"event":"sendFriendRequest","data":{"id":"target","username":"alice","avatar":3}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        let ClientMessage::SendFriendRequest(dto) = message else {
            panic!("expected sendFriendRequest");
        };
        assert_eq!(dto.id, "target");
        assert_eq!(dto.fields.get("username"), Some(&json!("alice")));
        assert_eq!(dto.fields.get("avatar"), Some(&json!(3)));
        assert!(!dto.fields.contains_key("id"));
    }

    #[test]
    fn test_parse_unknown_event_fails() {
        // テスト項目: 未知のイベントはパースエラーになる
        // given (前提条件):
        let text = r#"{"event":"deleteEverything","data":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_year_variants() {
        // テスト項目: 公開年は数値・数値文字列・日付文字列から読み取り、それ以外は不明とする
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(parse_year(&json!(2020)), Some(2020));
        assert_eq!(parse_year(&json!("1999")), Some(1999));
        assert_eq!(parse_year(&json!("2014-11-05")), Some(2014));
        assert_eq!(parse_year(&json!("soon")), None);
        assert_eq!(parse_year(&json!("99")), None);
        assert_eq!(parse_year(&json!(null)), None);
    }

    #[test]
    fn test_serialize_waiting_and_error() {
        // テスト項目: 文字列ペイロードのイベントは data に文字列が入る
        // given (前提条件):
        let waiting = ServerMessage::Waiting("Waiting for other user".to_string());
        let error = ServerMessage::Error("The room is full".to_string());

        // when (操作):
        let waiting = serde_json::to_value(&waiting).unwrap();
        let error = serde_json::to_value(&error).unwrap();

        // then (期待する結果):
        assert_eq!(
            waiting,
            json!({"event": "waiting", "data": "Waiting for other user"})
        );
        assert_eq!(error, json!({"event": "error", "data": "The room is full"}));
    }

    #[test]
    fn test_serialize_friend_request_received_flattens_fields() {
        // テスト項目: friendRequestReceived はリクエストのフィールドと fromId を同じ階層に持つ
        // given (前提条件):
        let mut fields = Map::new();
        fields.insert("username".to_string(), json!("alice"));
        let message = ServerMessage::FriendRequestReceived(FriendRequestReceivedDto {
            fields,
            from_id: "sender".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "friendRequestReceived",
                "data": {"username": "alice", "fromId": "sender"}
            })
        );
    }
}
