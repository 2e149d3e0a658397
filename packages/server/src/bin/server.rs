//! Two-party swipe-and-match session server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin futari-server
//! cargo run --bin futari-server -- --host 0.0.0.0 --port 3001 --allowed-origin http://localhost:3000
//! ```

use std::sync::Arc;

use clap::Parser;
use futari_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionDirectory, InMemorySessionRegistry},
    },
    ui::{Server, ServerConfig},
    usecase::{
        ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase, JoinRoomUseCase,
        RelayFriendRequestUseCase, SubmitChoiceUseCase,
    },
};
use futari_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "futari-server")]
#[command(about = "Two-party swipe-and-match session server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3001")]
    port: u16,

    /// Origin allowed to reach the server (repeatable)
    #[arg(long = "allowed-origin", default_value = "http://localhost:3000")]
    allowed_origins: Vec<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Registries
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create registries (in-memory, process lifetime only)
    let registry = Arc::new(InMemorySessionRegistry::new());
    let directory = Arc::new(InMemoryConnectionDirectory::new());
    let clock = Arc::new(SystemClock);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(directory.clone()));

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        directory.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        directory.clone(),
    ));
    let relay_friend_request_usecase =
        Arc::new(RelayFriendRequestUseCase::new(message_pusher.clone()));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let submit_choice_usecase = Arc::new(SubmitChoiceUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        relay_friend_request_usecase,
        create_room_usecase,
        join_room_usecase,
        submit_choice_usecase,
    );
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args.allowed_origins,
    };
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
