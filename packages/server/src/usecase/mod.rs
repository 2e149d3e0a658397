//! UseCase 層
//!
//! クライアントからのイベント 1 つにつき 1 つのユースケースを提供します。

pub mod connect_client;
pub mod create_room;
pub mod disconnect_client;
pub mod join_room;
pub mod relay_friend_request;
pub mod submit_choice;

pub use connect_client::ConnectClientUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_friend_request::RelayFriendRequestUseCase;
pub use submit_choice::SubmitChoiceUseCase;
