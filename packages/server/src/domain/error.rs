//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Connection ID must not be empty")]
    EmptyConnectionId,
}

/// ルーム参加時のエラー（呼び出し元に `error` イベントとして通知される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("The room does not exist")]
    RoomNotFound,

    #[error("The room is full")]
    RoomFull,
}

/// 選択（Choice）送信時のエラー（呼び出し元には通知せず黙って無視する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("The room does not exist")]
    RoomNotFound,

    #[error("Connection is not a member of the room")]
    NotARoomMember,

    #[error("A choice has already been recorded for this round")]
    AlreadySubmitted,
}
