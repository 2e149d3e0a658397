//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase, JoinRoomUseCase,
    RelayFriendRequestUseCase, SubmitChoiceUseCase,
};

use super::{handler::websocket_handler, signal::shutdown_signal, state::AppState};

/// Network parameters of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// The port number to bind to (e.g., 3001)
    pub port: u16,
    /// Origins allowed by the cross-origin policy. Empty (or `*`) means any origin.
    pub allowed_origins: Vec<String>,
}

/// WebSocket session server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     relay_friend_request_usecase,
///     create_room_usecase,
///     join_room_usecase,
///     submit_choice_usecase,
/// );
/// server.run(config).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance from its use cases
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        relay_friend_request_usecase: Arc<RelayFriendRequestUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        submit_choice_usecase: Arc<SubmitChoiceUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                disconnect_client_usecase,
                relay_friend_request_usecase,
                create_room_usecase,
                join_room_usecase,
                submit_choice_usecase,
            }),
        }
    }

    /// Build the axum router with the WebSocket route, CORS and HTTP tracing
    pub fn router(self, allowed_origins: &[String]) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            .with_state(self.state)
            .layer(cors_layer(allowed_origins))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the WebSocket session server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket session server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let app = self.router(&config.allowed_origins);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid allowed origin '{}': {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
