//! Shared test helpers
//!
//! - `MockStream`: scripted in-memory transport
//! - `TestServer`: in-process DMAP server over TCP

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use dmap::protocol::{
    read_packet, write_packet, Packet, PacketHeader, PacketType, KEY_SIZE, PACKET_MAGIC,
    PADDING_SIZE, VALUE_SIZE,
};
use dmap::Config;
use parking_lot::Mutex;

/// Result code the test server returns for a missing key
pub const NOT_FOUND: i32 = -2;

// =============================================================================
// Mock Transport
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Accept,
    /// `write` returns Ok(0)
    Stall,
    /// `write` returns BrokenPipe
    Fail,
}

/// Replays canned input and records everything written
pub struct MockStream {
    input: Cursor<Vec<u8>>,
    written: Vec<u8>,
    write_mode: WriteMode,
}

impl MockStream {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
            written: Vec::new(),
            write_mode: WriteMode::Accept,
        }
    }

    pub fn with_write_mode(input: Vec<u8>, write_mode: WriteMode) -> Self {
        Self {
            write_mode,
            ..Self::new(input)
        }
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Bytes consumed from the canned input
    pub fn read_position(&self) -> u64 {
        self.input.position()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_mode {
            WriteMode::Accept => {
                self.written.extend_from_slice(buf);
                Ok(buf.len())
            }
            WriteMode::Stall => Ok(0),
            WriteMode::Fail => Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw header bytes with arbitrary field values
pub fn raw_header(magic: u32, packet_type: u32, length: u32, result: u32) -> Vec<u8> {
    PacketHeader {
        magic,
        packet_type,
        length,
        result,
    }
    .to_bytes()
    .to_vec()
}

/// A well-formed response packet as bytes
pub fn response_bytes(packet_type: PacketType, result: i32, body: &[u8]) -> Vec<u8> {
    let mut bytes = raw_header(
        PACKET_MAGIC,
        packet_type.as_u32(),
        body.len() as u32,
        result as u32,
    );
    bytes.extend_from_slice(body);
    bytes
}

/// A value-carrying response body holding `value` followed by zero padding
pub fn value_body(value: &[u8]) -> Vec<u8> {
    let mut body = vec![0u8; VALUE_SIZE];
    body[..value.len()].copy_from_slice(value);
    body
}

// =============================================================================
// Test Server
// =============================================================================

type Store = Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>;

/// DMAP server on an ephemeral localhost port
///
/// Set overwrites; get, del, upd and cmpxchg on a missing key answer
/// `NOT_FOUND`. Lives until the test process exits.
pub struct TestServer {
    addr: String,
    store: Store,
}

impl TestServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let store: Store = Arc::new(Mutex::new(HashMap::new()));

        let accept_store = Arc::clone(&store);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let store = Arc::clone(&accept_store);
                thread::spawn(move || serve(stream, store));
            }
        });

        Self { addr, store }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn config(&self) -> Config {
        Config::builder()
            .server_addr(&self.addr)
            .read_timeout_ms(10_000)
            .write_timeout_ms(10_000)
            .build()
    }

    pub fn key_count(&self) -> usize {
        self.store.lock().len()
    }
}

fn serve(mut stream: TcpStream, store: Store) {
    let _ = stream.set_nodelay(true);
    loop {
        let Ok(request) = read_packet(&mut stream) else {
            return;
        };
        let response = handle(&request, &store);
        if write_packet(&mut stream, &response).is_err() {
            return;
        }
    }
}

fn handle(request: &Packet, store: &Store) -> Packet {
    let body = &request.body;
    let key = body.get(..KEY_SIZE).map(<[u8]>::to_vec);
    let first = body.get(KEY_SIZE..KEY_SIZE + VALUE_SIZE).map(<[u8]>::to_vec);
    let second = body
        .get(KEY_SIZE + VALUE_SIZE..KEY_SIZE + 2 * VALUE_SIZE)
        .map(<[u8]>::to_vec);

    let mut map = store.lock();
    let outcome: Result<Vec<u8>, i32> = match (PacketType::try_from(request.header.packet_type), key) {
        (Ok(PacketType::SetKey), Some(key)) => match first {
            Some(value) => {
                map.insert(key, value);
                Ok(vec![0u8; PADDING_SIZE])
            }
            None => Err(-22),
        },
        (Ok(PacketType::GetKey), Some(key)) => map.get(&key).cloned().ok_or(NOT_FOUND),
        (Ok(PacketType::DelKey), Some(key)) => map
            .remove(&key)
            .map(|_| vec![0u8; PADDING_SIZE])
            .ok_or(NOT_FOUND),
        (Ok(PacketType::UpdKey), Some(key)) => match (map.get_mut(&key), first) {
            (Some(slot), Some(value)) => {
                *slot = value;
                Ok(vec![0u8; PADDING_SIZE])
            }
            (None, _) => Err(NOT_FOUND),
            (_, None) => Err(-22),
        },
        (Ok(PacketType::CmpxchgKey), Some(key)) => match (map.get_mut(&key), first, second) {
            (Some(slot), Some(exchange), Some(comparand)) => {
                let prior = slot.clone();
                if *slot == comparand {
                    *slot = exchange;
                }
                Ok(prior)
            }
            (None, _, _) => Err(NOT_FOUND),
            _ => Err(-22),
        },
        _ => Err(-22),
    };
    drop(map);

    let (result, body) = match outcome {
        Ok(body) => (0i32, body),
        Err(code) => (code, Vec::new()),
    };

    Packet {
        header: PacketHeader {
            magic: PACKET_MAGIC,
            packet_type: request.header.packet_type,
            length: body.len() as u32,
            result: result as u32,
        },
        body: body.into(),
    }
}
