//! Session
//!
//! Owns one stream connection and pairs each request with its response.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{DmapError, Result};
use crate::protocol::{read_packet, write_packet, Packet, Request, Response};

/// Lifecycle of a connection
///
/// `Closed` is terminal: a session closed by the caller or by a fatal error
/// is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconnected,
    Connected,
    Closed,
}

/// A single DMAP connection
///
/// Strictly one request in flight: every round trip takes `&mut self`, so
/// sharing a session between threads needs an external lock, and independent
/// workloads should each open their own session.
pub struct Session<S = TcpStream> {
    /// Underlying transport, `None` once closed
    stream: Option<S>,

    state: SessionState,

    /// Peer address for logging
    peer_addr: String,
}

impl Session<TcpStream> {
    /// Dial the configured server
    ///
    /// Applies nodelay and socket timeouts from the config.
    pub fn connect(config: &Config) -> Result<Self> {
        let stream = dial(config)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.server_addr.clone());

        stream.set_nodelay(config.nodelay)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream: Some(stream),
            state: SessionState::Connected,
            peer_addr,
        })
    }
}

impl<S: Read + Write> Session<S> {
    /// Wrap an already-open stream
    pub fn new(stream: S) -> Self {
        Self::with_peer(stream, "stream")
    }

    /// Wrap an already-open stream, labelled for logging
    pub fn with_peer(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            stream: Some(stream),
            state: SessionState::Connected,
            peer_addr: peer_addr.into(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// The transport, until [`Session::close`] drops it
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Write one packet, header and body in a single buffer
    pub fn send(&mut self, packet: &Packet) -> Result<()> {
        let stream = self.stream_mut()?;
        let result = write_packet(stream, packet);
        result.map_err(|e| self.fail(e))?;

        tracing::trace!(
            "Sent packet to {}: type={} len={}",
            self.peer_addr,
            packet.header.packet_type,
            packet.header.length
        );
        Ok(())
    }

    /// Read one packet
    ///
    /// Blocks until the transport delivers a full packet, closes, or errors.
    pub fn receive(&mut self) -> Result<Packet> {
        let stream = self.stream_mut()?;
        let result = read_packet(stream);
        let packet = result.map_err(|e| self.fail(e))?;

        tracing::trace!(
            "Received packet from {}: type={} len={} result={}",
            self.peer_addr,
            packet.header.packet_type,
            packet.header.length,
            packet.header.result_code()
        );
        Ok(packet)
    }

    /// Send a request and read back its response
    ///
    /// The response must echo the request's type; anything else means the
    /// stream is out of step and the session is closed. A nonzero result is
    /// returned as [`DmapError::Server`] and the session stays usable.
    pub fn round_trip<R: Request>(&mut self, request: &R) -> Result<R::Response> {
        self.send(&request.to_packet())?;
        let packet = self.receive()?;

        let expected = R::PACKET_TYPE.as_u32();
        if packet.header.packet_type != expected {
            let err = DmapError::Protocol(format!(
                "type mismatch: got {}, expected {}",
                packet.header.packet_type, expected
            ));
            return Err(self.fail(err));
        }

        if packet.header.result != 0 {
            return Err(DmapError::Server(packet.header.result_code()));
        }

        R::Response::decode_body(&packet.body)
    }

    /// Close the connection
    ///
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!("Closed connection to {}", self.peer_addr);
        }
        self.state = SessionState::Closed;
    }

    fn stream_mut(&mut self) -> Result<&mut S> {
        match (self.state, self.stream.as_mut()) {
            (SessionState::Connected, Some(stream)) => Ok(stream),
            _ => Err(DmapError::NotConnected),
        }
    }

    /// Mark the session closed if `err` breaks framing, then hand it back
    fn fail(&mut self, err: DmapError) -> DmapError {
        if err.is_fatal() && self.state == SessionState::Connected {
            tracing::warn!("Closing session to {} after error: {}", self.peer_addr, err);
            self.state = SessionState::Closed;
        }
        err
    }
}

fn dial(config: &Config) -> Result<TcpStream> {
    if config.connect_timeout_ms == 0 {
        return Ok(TcpStream::connect(config.server_addr.as_str())?);
    }

    let timeout = Duration::from_millis(config.connect_timeout_ms);
    let mut last_err = None;
    for addr in config.server_addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(match last_err {
        Some(e) => DmapError::Io(e),
        None => DmapError::Config(format!(
            "Address {} resolved to no socket address",
            config.server_addr
        )),
    })
}
