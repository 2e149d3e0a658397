//! データストアの実装
//!
//! - `inmemory`: プロセス内メモリに保持する実装（プロセス終了で消える）

pub mod inmemory;

pub use inmemory::{InMemoryConnectionDirectory, InMemorySessionRegistry};
