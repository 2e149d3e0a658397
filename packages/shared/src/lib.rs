//! Utilities shared by the Futari packages.

pub mod logger;
pub mod time;
