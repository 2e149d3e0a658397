//! ConnectionDirectory trait 定義
//!
//! 生存中の接続を接続 ID で管理する。ユーザーレベルの情報は持たない。

use async_trait::async_trait;

use super::{message_pusher::PusherChannel, value_object::ConnectionId};

#[async_trait]
pub trait ConnectionDirectory: Send + Sync {
    /// 接続を登録
    async fn register(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// 接続 ID から送信先を解決する。未知・切断済みなら None
    async fn resolve(&self, connection_id: &ConnectionId) -> Option<PusherChannel>;

    /// 接続を登録解除（存在しなくても何もしない）
    async fn unregister(&self, connection_id: &ConnectionId);

    /// 登録中の接続数
    async fn count(&self) -> usize;
}
