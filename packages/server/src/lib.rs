//! Two-party swipe-and-match session server.
//!
//! Two participants join a named room, each submits liked / disliked / maybe
//! lists, and the combined ranking is broadcast to both. A friend-request
//! handshake is relayed between live connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
