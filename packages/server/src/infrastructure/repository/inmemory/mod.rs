//! InMemory 実装

pub mod connection_directory;
pub mod session_registry;

pub use connection_directory::InMemoryConnectionDirectory;
pub use session_registry::InMemorySessionRegistry;
