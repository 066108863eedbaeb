//! Error types for the engine bridge.

use std::time::Duration;

use thiserror::Error;

/// Errors from the engine bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to spawn engine process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("engine executable not found: {0}")]
    EngineNotFound(String),

    #[error("engine process is not running")]
    NotRunning,

    #[error("failed to send request to engine: {0}")]
    SendFailed(String),

    #[error("failed to read response from engine: {0}")]
    ReadFailed(String),

    #[error("engine did not respond within {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A failure reported by the engine itself, passed through verbatim.
    #[error("engine reported an error: {0}")]
    Engine(String),

    #[error("unexpected response from engine: {0}")]
    UnexpectedResponse(String),

    /// The engine answered with a cell address the client cannot parse.
    #[error("invalid cell address from engine: {0}")]
    Address(#[from] cellwire_core::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
