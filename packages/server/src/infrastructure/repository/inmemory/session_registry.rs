//! InMemory SessionRegistry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、各操作は 1 回のロック取得で完結します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Choice, ChoiceError, ChoiceProgress, ConnectionId, Participant, Room, RoomError, RoomName,
    SessionRegistry, Timestamp,
};

/// インメモリ SessionRegistry 実装
#[derive(Default)]
pub struct InMemorySessionRegistry {
    /// Key: ルーム名, Value: ルーム
    rooms: Mutex<HashMap<RoomName, Room>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create_room(
        &self,
        name: RoomName,
        creator: Participant,
        created_at: Timestamp,
    ) -> Vec<Participant> {
        let mut rooms = self.rooms.lock().await;
        let room = Room::new(name.clone(), creator, created_at);
        match rooms.insert(name, room) {
            Some(previous) => previous.participants,
            None => Vec::new(),
        }
    }

    async fn join_room(
        &self,
        name: &RoomName,
        participant: Participant,
    ) -> Result<Vec<Participant>, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(name).ok_or(RoomError::RoomNotFound)?;
        room.add_participant(participant)?;
        Ok(room.participants.clone())
    }

    async fn record_choice(
        &self,
        name: &RoomName,
        connection_id: &ConnectionId,
        choice: Choice,
    ) -> Result<ChoiceProgress, ChoiceError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(name).ok_or(ChoiceError::RoomNotFound)?;
        room.record_choice(connection_id, choice)
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        let mut rooms = self.rooms.lock().await;
        let mut closed = Vec::new();

        // ラウンド終了で既に空になっていたルームもここで削除する
        rooms.retain(|name, room| {
            room.remove_connection(connection_id);
            if room.is_empty() {
                closed.push(name.clone());
                return false;
            }
            true
        });
        closed.sort();

        closed
    }

    async fn get_room(&self, name: &RoomName) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(name).cloned()
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
