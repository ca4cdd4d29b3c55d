//! Network Module
//!
//! Client-side connection handling.
//!
//! ## Model
//! - One blocking stream per session
//! - One request in flight per session, no pipelining
//! - No retries or reconnection; fatal errors close the session

mod session;

pub use session::{Session, SessionState};
