//! Process-wide infrastructure: configuration resolved once at startup and
//! the global logger.

pub mod config;
pub mod logging;
