//! Server state shared by every connection handler.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase, JoinRoomUseCase,
    RelayFriendRequestUseCase, SubmitChoiceUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// RelayFriendRequestUseCase（フレンドリクエスト中継のユースケース）
    pub relay_friend_request_usecase: Arc<RelayFriendRequestUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SubmitChoiceUseCase（選択送信のユースケース）
    pub submit_choice_usecase: Arc<SubmitChoiceUseCase>,
}
