//! Client Module
//!
//! The five typed key-value operations on top of a [`Session`].
//!
//! ## Operation template
//! 1. Check every argument against its field width (no I/O on failure)
//! 2. Zero-fill the fields and copy the arguments in
//! 3. One round trip on the session
//! 4. Decode the fixed-layout response
//!
//! Returned values are the full 4096-byte field; nothing is trimmed.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{DmapError, Result};
use crate::network::{Session, SessionState};
use crate::protocol::{
    CmpxchgKeyRequest, DelKeyRequest, GetKeyRequest, Key, SetKeyRequest, UpdKeyRequest, Value,
};

/// DMAP client
///
/// Holds at most one session. Operations take `&mut self`, so a client is
/// used by one caller at a time; open one client per concurrent workload.
pub struct Client<S = TcpStream> {
    config: Config,
    session: Option<Session<S>>,
}

impl Client<TcpStream> {
    /// Create an unconnected client
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Create a client and dial the server
    pub fn connect(config: Config) -> Result<Self> {
        let mut client = Self::new(config);
        client.dial()?;
        Ok(client)
    }

    /// Open a fresh connection to the configured server
    ///
    /// Any previous session is closed first.
    pub fn dial(&mut self) -> Result<()> {
        self.close();
        self.session = Some(Session::connect(&self.config)?);
        Ok(())
    }
}

impl<S: Read + Write> Client<S> {
    /// Use an already-open stream
    pub fn with_transport(stream: S) -> Self {
        Self {
            config: Config::default(),
            session: Some(Session::new(stream)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> Option<&Session<S>> {
        self.session.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Unconnected, Session::state)
    }

    /// Store `value` under `key`
    pub fn set_key(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let request = SetKeyRequest {
            key: Key::from_arg("key", key.as_ref())?,
            value: Value::from_arg("value", value.as_ref())?,
        };
        self.session_mut()?.round_trip(&request)?;
        Ok(())
    }

    /// Fetch the full value field stored under `key`
    pub fn get_key(&mut self, key: impl AsRef<[u8]>) -> Result<Value> {
        let request = GetKeyRequest {
            key: Key::from_arg("key", key.as_ref())?,
        };
        let response = self.session_mut()?.round_trip(&request)?;
        Ok(response.value)
    }

    /// Remove `key`
    pub fn delete_key(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        let request = DelKeyRequest {
            key: Key::from_arg("key", key.as_ref())?,
        };
        self.session_mut()?.round_trip(&request)?;
        Ok(())
    }

    /// Replace the value of an existing `key`
    pub fn update_key(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let request = UpdKeyRequest {
            key: Key::from_arg("key", key.as_ref())?,
            value: Value::from_arg("value", value.as_ref())?,
        };
        self.session_mut()?.round_trip(&request)?;
        Ok(())
    }

    /// Swap in `exchange` if the stored value equals `comparand`
    ///
    /// Returns the value stored before the operation. The swap happened iff
    /// that value equals the zero-padded `comparand`.
    pub fn compare_exchange_key(
        &mut self,
        key: impl AsRef<[u8]>,
        exchange: impl AsRef<[u8]>,
        comparand: impl AsRef<[u8]>,
    ) -> Result<Value> {
        let request = CmpxchgKeyRequest {
            key: Key::from_arg("key", key.as_ref())?,
            exchange: Value::from_arg("exchange", exchange.as_ref())?,
            comparand: Value::from_arg("comparand", comparand.as_ref())?,
        };
        let response = self.session_mut()?.round_trip(&request)?;
        Ok(response.value)
    }

    /// Close the connection, if any
    ///
    /// A no-op on a client that was never connected or is already closed.
    pub fn close(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.close();
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session<S>> {
        self.session.as_mut().ok_or(DmapError::NotConnected)
    }
}
