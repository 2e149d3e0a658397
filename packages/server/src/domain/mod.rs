//! ドメイン層
//!
//! ルームのライフサイクル、選択の集計、配信・保存のインターフェースを定義します。
//! Infrastructure 層には依存しません。

pub mod connection;
pub mod entity;
pub mod error;
pub mod event;
pub mod matching;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use connection::ConnectionDirectory;
pub use entity::{
    Category, Choice, ChoiceProgress, Item, Participant, ROOM_CAPACITY, Room, RoomPhase,
    ScoredItem,
};
pub use error::{ChoiceError, RoomError, ValueObjectError};
pub use event::{FriendRequestFields, ServerEvent, WAITING_MESSAGE};
pub use matching::combine_and_rank;
pub use message_pusher::{Delivery, MessagePusher, PusherChannel};
pub use repository::SessionRegistry;
pub use value_object::{ConnectionId, ConnectionIdFactory, ItemId, RoomName, Timestamp, UserId};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
