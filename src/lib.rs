//! askbridge: one HTTP API in front of the claude, gemini and codex CLIs.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod provider;
pub mod server;
pub mod ui;

pub use error::{BridgeError, Result};
