//! Snippets CLI Library
//!
//! Terminal host for the card carousel: configuration, a file-backed message
//! feed, a simulated asynchronous audio backend, scripted replays and text
//! rendering.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod feed;
pub mod render;
pub mod script;
pub mod session;
pub mod simulator;

// Re-export commonly used types for convenience
pub use config::{FeedSettings, SimulatorSettings, SnippetsConfig};
pub use error::{CliError, Result};
pub use feed::{FeedFile, JsonFileFeed};
pub use script::{Script, Step};
pub use session::Session;
pub use simulator::SimulatedBackend;
