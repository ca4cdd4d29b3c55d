//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌───────────┬──────────┬──────────┬──────────┬──────────────────────┐
//! │ Magic (4) │ Type (4) │  Len (4) │Result (4)│   Body (Len bytes)   │
//! └───────────┴──────────┴──────────┴──────────┴──────────────────────┘
//! ```
//!
//! All header fields are little-endian `u32`. The body is opaque here; the
//! typed request/response structs give it meaning.

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::header::{Packet, PacketHeader, HEADER_SIZE, MAX_BODY_SIZE, PACKET_MAGIC};
use crate::error::{DmapError, Result};

// =============================================================================
// Packet Encoding/Decoding
// =============================================================================

/// Encode a packet to bytes
///
/// Format: header (16) + body
pub fn encode_packet(packet: &Packet) -> Result<BytesMut> {
    let body_len = packet.body.len();
    if body_len > MAX_BODY_SIZE as usize {
        return Err(DmapError::Encode(format!(
            "Body too large: {} bytes (max {})",
            body_len, MAX_BODY_SIZE
        )));
    }
    if packet.header.length as usize != body_len {
        return Err(DmapError::Encode(format!(
            "Header length {} does not match body length {}",
            packet.header.length, body_len
        )));
    }

    let mut message = BytesMut::with_capacity(HEADER_SIZE + body_len);
    message.put_slice(&packet.header.to_bytes());
    message.put_slice(&packet.body);

    Ok(message)
}

/// Parse and validate a header
///
/// Rejects a wrong magic, and a length past the body limit so that no
/// allocation is sized from an unchecked wire value.
pub fn decode_header(bytes: &[u8]) -> Result<PacketHeader> {
    let header = PacketHeader::from_bytes(bytes)?;

    if header.magic != PACKET_MAGIC {
        return Err(DmapError::Protocol(format!(
            "bad magic: 0x{:08X}",
            header.magic
        )));
    }

    if header.length > MAX_BODY_SIZE {
        return Err(DmapError::Protocol(format!(
            "body too large: {} bytes (max {})",
            header.length, MAX_BODY_SIZE
        )));
    }

    Ok(header)
}

/// Decode a packet from separately received header and body bytes
pub fn decode_packet(header_bytes: &[u8], body_bytes: &[u8]) -> Result<Packet> {
    let header = decode_header(header_bytes)?;

    if body_bytes.len() != header.length as usize {
        return Err(DmapError::Decode(format!(
            "Incomplete body: expected {} bytes, got {}",
            header.length,
            body_bytes.len()
        )));
    }

    Ok(Packet {
        header,
        body: Bytes::copy_from_slice(body_bytes),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete packet from a stream
///
/// Blocks until a complete packet is received or an error occurs. The body is
/// only read once the header has passed validation.
pub fn read_packet<R: Read>(reader: &mut R) -> Result<Packet> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;

    let header = decode_header(&header_bytes)?;

    let mut body = vec![0u8; header.length as usize];
    if header.length > 0 {
        reader.read_exact(&mut body)?;
    }

    Ok(Packet {
        header,
        body: Bytes::from(body),
    })
}

/// Write a packet to a stream as a single buffer
pub fn write_packet<W: Write>(writer: &mut W, packet: &Packet) -> Result<()> {
    let bytes = encode_packet(packet)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
