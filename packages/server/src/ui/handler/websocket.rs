//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, RoomName},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to this
/// connection (via rx channel) are written to its WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await;

    let (sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive events from this connection, one at a time
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id_clone, text);
                    dispatch(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push events addressed to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
}

/// Parse one inbound frame and route it to its use case.
///
/// Frames that fail to parse are logged and dropped; the connection stays open.
async fn dispatch(state: &AppState, from: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring unparseable frame from '{}': {}", from, e);
            return;
        }
    };

    match message {
        ClientMessage::SendFriendRequest(dto) => {
            let Some(target) = parse_target(dto.id) else {
                return;
            };
            state
                .relay_friend_request_usecase
                .send_request(from, &target, dto.fields)
                .await;
        }
        ClientMessage::AcceptFriendRequest(dto) => {
            let Some(target) = parse_target(dto.id) else {
                return;
            };
            state
                .relay_friend_request_usecase
                .accept_request(from, &target)
                .await;
        }
        ClientMessage::RejectFriendRequest(dto) => {
            let Some(target) = parse_target(dto.id) else {
                return;
            };
            state
                .relay_friend_request_usecase
                .reject_request(from, &target)
                .await;
        }
        ClientMessage::CreateRoom(dto) => {
            state
                .create_room_usecase
                .execute(from.clone(), RoomName::new(dto.room), dto.user_id)
                .await;
        }
        ClientMessage::JoinRoom(dto) => {
            // Failures are already reported to the caller by the use case
            let _ = state
                .join_room_usecase
                .execute(from.clone(), RoomName::new(dto.room), dto.user_id)
                .await;
        }
        ClientMessage::ChooseMovie(dto) => {
            let (room, choice) = dto.into_submission();
            let _ = state
                .submit_choice_usecase
                .execute(from, &room, choice)
                .await;
        }
    }
}

/// An empty target id can never be reachable; drop the event like any unreachable peer.
fn parse_target(id: String) -> Option<ConnectionId> {
    match ConnectionId::try_from(id) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::debug!("Dropping friend request event: {}", e);
            None
        }
    }
}
