//! UseCase: フレンドリクエストの中継
//!
//! request → accept / reject の 3 段階のハンドシェイクを、接続 ID で指定された
//! 相手に中継します。状態は持ちません。宛先が到達不能ならリクエストは黙って破棄し、
//! 送信者にもエラーを返しません（fire-and-forget）。

use std::sync::Arc;

use crate::domain::{ConnectionId, Delivery, FriendRequestFields, MessagePusher, ServerEvent};

/// フレンドリクエスト中継のユースケース
pub struct RelayFriendRequestUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayFriendRequestUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// `friendRequestReceived` を宛先に届ける
    pub async fn send_request(
        &self,
        from: &ConnectionId,
        target: &ConnectionId,
        fields: FriendRequestFields,
    ) -> Delivery {
        let event = ServerEvent::FriendRequestReceived {
            from: from.clone(),
            fields,
        };
        let delivery = self.message_pusher.push_to(target, &event).await;
        if !delivery.is_delivered() {
            tracing::debug!(
                "Friend request from '{}' dropped: '{}' is unreachable",
                from,
                target
            );
        }
        delivery
    }

    /// 承認を双方に通知する（宛先に届いた場合のみ送信者にも返す）
    pub async fn accept_request(&self, from: &ConnectionId, target: &ConnectionId) -> Delivery {
        self.respond(from, target, |peer| ServerEvent::FriendRequestAccepted { from: peer })
            .await
    }

    /// 拒否を双方に通知する（宛先に届いた場合のみ送信者にも返す）
    pub async fn reject_request(&self, from: &ConnectionId, target: &ConnectionId) -> Delivery {
        self.respond(from, target, |peer| ServerEvent::FriendRequestRejected { from: peer })
            .await
    }

    async fn respond(
        &self,
        from: &ConnectionId,
        target: &ConnectionId,
        make_event: impl Fn(ConnectionId) -> ServerEvent,
    ) -> Delivery {
        let to_target = make_event(from.clone());
        let delivery = self.message_pusher.push_to(target, &to_target).await;
        if !delivery.is_delivered() {
            tracing::debug!(
                "'{}' from '{}' dropped: '{}' is unreachable",
                to_target.name(),
                from,
                target
            );
            return delivery;
        }

        let to_sender = make_event(target.clone());
        self.message_pusher.push_to(from, &to_sender).await;
        delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;
    use mockall::{Sequence, predicate::eq};
    use serde_json::{Map, json};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 宛先と送信者のそれぞれに、どのイベントが何回送られるか
    //
    // 【なぜこのテストが必要か】
    // - 到達不能な宛先への中継では送信者にも何も返らない（fire-and-forget）ことを保証する
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_send_request_forwards_fields_and_sender() {
        // テスト項目: リクエストのフィールドと送信者 ID が宛先に届く
        // given (前提条件):
        let mut fields = Map::new();
        fields.insert("username".to_string(), json!("alice"));
        let expected = ServerEvent::FriendRequestReceived {
            from: conn("alice"),
            fields: fields.clone(),
        };
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .with(eq(conn("bob")), eq(expected))
            .times(1)
            .returning(|_, _| Delivery::Delivered);
        let usecase = RelayFriendRequestUseCase::new(Arc::new(pusher));

        // when (操作):
        let delivery = usecase
            .send_request(&conn("alice"), &conn("bob"), fields)
            .await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::Delivered);
    }

    #[tokio::test]
    async fn test_send_request_to_unreachable_target_is_silent() {
        // テスト項目: 到達不能な宛先へのリクエストは送信者に何も返さない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|target, _| target.as_str() == "ghost")
            .times(1)
            .returning(|_, _| Delivery::Unreachable);
        let usecase = RelayFriendRequestUseCase::new(Arc::new(pusher));

        // when (操作):
        let delivery = usecase
            .send_request(&conn("alice"), &conn("ghost"), Map::new())
            .await;

        // then (期待する結果): 送信者宛ての push_to は呼ばれない（times(1) で検証）
        assert_eq!(delivery, Delivery::Unreachable);
    }

    #[tokio::test]
    async fn test_accept_request_confirms_both_sides() {
        // テスト項目: 承認すると宛先には送信者 ID、送信者には宛先 ID で通知される
        // given (前提条件):
        let mut seq = Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .with(
                eq(conn("alice")),
                eq(ServerEvent::FriendRequestAccepted { from: conn("bob") }),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Delivery::Delivered);
        pusher
            .expect_push_to()
            .with(
                eq(conn("bob")),
                eq(ServerEvent::FriendRequestAccepted {
                    from: conn("alice"),
                }),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Delivery::Delivered);
        let usecase = RelayFriendRequestUseCase::new(Arc::new(pusher));

        // when (操作): bob が alice のリクエストを承認
        let delivery = usecase.accept_request(&conn("bob"), &conn("alice")).await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::Delivered);
    }

    #[tokio::test]
    async fn test_reject_request_confirms_both_sides() {
        // テスト項目: 拒否すると宛先には送信者 ID、送信者には宛先 ID で friendRequestRejected が通知される
        // given (前提条件):
        let mut seq = Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .with(
                eq(conn("alice")),
                eq(ServerEvent::FriendRequestRejected { from: conn("bob") }),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Delivery::Delivered);
        pusher
            .expect_push_to()
            .with(
                eq(conn("bob")),
                eq(ServerEvent::FriendRequestRejected {
                    from: conn("alice"),
                }),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Delivery::Delivered);
        let usecase = RelayFriendRequestUseCase::new(Arc::new(pusher));

        // when (操作): bob が alice のリクエストを拒否
        let delivery = usecase.reject_request(&conn("bob"), &conn("alice")).await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::Delivered);
    }

    #[tokio::test]
    async fn test_reject_request_to_unreachable_target_skips_sender() {
        // テスト項目: 宛先が到達不能なら、送信者側の確認通知も送られない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .with(
                eq(conn("alice")),
                eq(ServerEvent::FriendRequestRejected { from: conn("bob") }),
            )
            .times(1)
            .returning(|_, _| Delivery::Unreachable);
        let usecase = RelayFriendRequestUseCase::new(Arc::new(pusher));

        // when (操作):
        let delivery = usecase.reject_request(&conn("bob"), &conn("alice")).await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::Unreachable);
    }
}
