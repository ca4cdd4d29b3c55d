//! # DMAP Client
//!
//! A client for the DMAP remote key-value protocol:
//! - Fixed-size keys (16 bytes) and values (4096 bytes)
//! - Five operations: set, get, delete, update, compare-and-exchange
//! - Framed binary packets over one persistent TCP connection
//! - Strict request/response pairing, one request in flight
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Client                                │
//! │        set / get / del / upd / cmpxchg (arg checks)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                               │
//! │        send / receive / round_trip (type correlation)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │  Transport  │
//!   │ (header +   │          │ (TcpStream) │
//!   │  payloads)  │          └─────────────┘
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dmap::{Client, Config};
//!
//! let config = Config::builder().server_addr("127.0.0.1:8111").build();
//! let mut client = Client::connect(config)?;
//! client.set_key("alpha", "1234")?;
//! let value = client.get_key("alpha")?;
//! assert_eq!(value.trimmed(), b"1234");
//! client.close();
//! # Ok::<(), dmap::DmapError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DmapError, Result};
pub use config::Config;
pub use client::Client;
pub use network::{Session, SessionState};
pub use protocol::{Key, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the DMAP client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
