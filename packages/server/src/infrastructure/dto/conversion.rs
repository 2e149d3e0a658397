//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    entity::{Choice, Item, Participant, ScoredItem},
    event::ServerEvent,
    value_object::RoomName,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::CardDto> for Item {
    fn from(dto: dto::CardDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            poster_image: dto.poster_image,
            year: dto.year,
        }
    }
}

impl dto::ChooseMovieDto {
    /// Split the payload into the target room and the submitted choice.
    pub fn into_submission(self) -> (RoomName, Choice) {
        let choice = Choice::new(
            self.liked_cards.into_iter().map(Item::from).collect(),
            self.disliked_cards.into_iter().map(Item::from).collect(),
            self.maybe_cards.into_iter().map(Item::from).collect(),
        );
        (RoomName::new(self.room), choice)
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Participant> for dto::RoomMemberDto {
    fn from(model: &Participant) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            user_id: model.user_id.clone(),
        }
    }
}

impl From<&ScoredItem> for dto::ScoredCardDto {
    fn from(model: &ScoredItem) -> Self {
        Self {
            id: model.id.clone(),
            title: model.title.clone(),
            poster_image: model.poster_image.clone(),
            score: model.score,
            year: model.year,
        }
    }
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Connected {
                connection_id,
                connected_at,
            } => dto::ServerMessage::Connected(dto::ConnectedDto {
                connection_id: connection_id.as_str().to_string(),
                connected_at: connected_at.value(),
            }),
            ServerEvent::FriendRequestReceived { from, fields } => {
                let mut fields = fields.clone();
                // fromId is always the server-observed sender
                fields.remove("fromId");
                dto::ServerMessage::FriendRequestReceived(dto::FriendRequestReceivedDto {
                    fields,
                    from_id: from.as_str().to_string(),
                })
            }
            ServerEvent::FriendRequestAccepted { from } => {
                dto::ServerMessage::FriendRequestAccepted(dto::FriendResponseResultDto {
                    from_id: from.as_str().to_string(),
                })
            }
            ServerEvent::FriendRequestRejected { from } => {
                dto::ServerMessage::FriendRequestRejected(dto::FriendResponseResultDto {
                    from_id: from.as_str().to_string(),
                })
            }
            ServerEvent::Waiting { message } => dto::ServerMessage::Waiting(message.clone()),
            ServerEvent::RoomReady { participants } => dto::ServerMessage::RoomReady(
                participants.iter().map(dto::RoomMemberDto::from).collect(),
            ),
            ServerEvent::MatchResult { items } => dto::ServerMessage::MatchResult(
                items.iter().map(dto::ScoredCardDto::from).collect(),
            ),
            ServerEvent::Error { message } => dto::ServerMessage::Error(message.clone()),
        }
    }
}
