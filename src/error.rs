//! Error types for the DMAP client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DmapError
pub type Result<T> = std::result::Result<T, DmapError>;

/// Unified error type for DMAP client operations
#[derive(Debug, Error)]
pub enum DmapError {
    // -------------------------------------------------------------------------
    // Local Precondition Errors
    // -------------------------------------------------------------------------
    /// An argument does not fit its fixed-size wire field. Never reaches the wire.
    #[error("Argument error: {0}")]
    Argument(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    /// Bad magic, oversized body length or request/response type mismatch.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    /// Nonzero `result` in a well-formed response, read as a signed code.
    #[error("Server error: {0}")]
    Server(i32),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DmapError {
    /// Whether this error leaves the connection unusable.
    ///
    /// I/O and protocol errors leave the stream in an unknown framing state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DmapError::Io(_) | DmapError::Protocol(_))
    }

    /// The server's error code, if this is a server error.
    pub fn server_code(&self) -> Option<i32> {
        match self {
            DmapError::Server(code) => Some(*code),
            _ => None,
        }
    }
}
