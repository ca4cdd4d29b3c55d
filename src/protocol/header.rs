//! Packet header and packet type definitions

use bytes::{Buf, BufMut, Bytes};

use crate::error::{DmapError, Result};

/// Sentinel carried in the first four bytes of every packet
pub const PACKET_MAGIC: u32 = 0xCBEE_CBEE;

/// Header size: magic (4) + type (4) + length (4) + result (4)
pub const HEADER_SIZE: usize = 16;

/// Maximum body size accepted on receive
pub const MAX_BODY_SIZE: u32 = 65520;

/// Key field width
pub const KEY_SIZE: usize = 16;

/// Value field width
pub const VALUE_SIZE: usize = 4096;

/// Packet types
///
/// A response carries the type of the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PacketType {
    SetKey = 4,
    GetKey = 5,
    DelKey = 6,
    UpdKey = 7,
    CmpxchgKey = 8,
}

impl PacketType {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for PacketType {
    type Error = DmapError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            4 => Ok(PacketType::SetKey),
            5 => Ok(PacketType::GetKey),
            6 => Ok(PacketType::DelKey),
            7 => Ok(PacketType::UpdKey),
            8 => Ok(PacketType::CmpxchgKey),
            _ => Err(DmapError::Protocol(format!("Unknown packet type: {}", value))),
        }
    }
}

/// Fixed 16-byte packet header, little-endian on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub magic: u32,
    /// Raw type; kept unparsed so a desynchronized peer's value can be reported
    pub packet_type: u32,
    pub length: u32,
    pub result: u32,
}

impl PacketHeader {
    /// Build a request header with the magic set and a zero result
    pub fn new(packet_type: PacketType, length: u32) -> Self {
        Self {
            magic: PACKET_MAGIC,
            packet_type: packet_type.as_u32(),
            length,
            result: 0,
        }
    }

    /// The result field read as a signed error code
    pub fn result_code(&self) -> i32 {
        self.result as i32
    }

    /// Serialize the header into wire order
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut buf = &mut bytes[..];
        buf.put_u32_le(self.magic);
        buf.put_u32_le(self.packet_type);
        buf.put_u32_le(self.length);
        buf.put_u32_le(self.result);
        bytes
    }

    /// Parse a header without validating it
    ///
    /// Magic and length checks live in [`super::decode_header`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(DmapError::Decode(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let mut buf = &bytes[..HEADER_SIZE];
        Ok(Self {
            magic: buf.get_u32_le(),
            packet_type: buf.get_u32_le(),
            length: buf.get_u32_le(),
            result: buf.get_u32_le(),
        })
    }
}

/// One framed unit: header plus exactly `header.length` body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: PacketHeader,
    pub body: Bytes,
}

impl Packet {
    /// Wrap a request body in a header for the given type
    ///
    /// The length field saturates for bodies past `u32::MAX`; the encoder
    /// rejects those before anything is written.
    pub fn new(packet_type: PacketType, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let length = u32::try_from(body.len()).unwrap_or(u32::MAX);
        Self {
            header: PacketHeader::new(packet_type, length),
            body,
        }
    }
}
