//! MessagePusher trait 定義（Broadcaster）
//!
//! クライアントへのイベント配信のインターフェース。配信は fire-and-forget で、
//! 失敗を返すことはなく「届けられたかどうか」だけを返す。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{event::ServerEvent, value_object::ConnectionId};

/// クライアントへの送信チャンネル（シリアライズ済み JSON を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 1 回の配信試行の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// 宛先が存在しない、または既に切断されている
    Unreachable,
}

impl Delivery {
    pub fn is_delivered(self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 1 つの接続にイベントを送る（toConnection）
    async fn push_to(&self, target: &ConnectionId, event: &ServerEvent) -> Delivery;

    /// 複数の接続にイベントを送る（toRoom）。届けられた数を返す
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ServerEvent) -> usize;
}
