//! Request payloads
//!
//! One fixed-layout struct per operation. Fields are written in declaration
//! order with no length prefixes.

use bytes::{BufMut, BytesMut};

use super::field::{Key, Value};
use super::header::{Packet, PacketType, KEY_SIZE, VALUE_SIZE};
use super::response::{
    CmpxchgKeyResponse, DelKeyResponse, GetKeyResponse, Response, SetKeyResponse,
    UpdKeyResponse,
};

/// A typed request and the response it pairs with
pub trait Request {
    /// Type sent in the header and expected back in the response
    const PACKET_TYPE: PacketType;

    /// Encoded body size in bytes
    const BODY_SIZE: usize;

    type Response: Response;

    /// Append the body to `buf`
    fn encode_body(&self, buf: &mut BytesMut);

    /// Frame this request as a packet
    fn to_packet(&self) -> Packet {
        let mut body = BytesMut::with_capacity(Self::BODY_SIZE);
        self.encode_body(&mut body);
        Packet::new(Self::PACKET_TYPE, body.freeze())
    }
}

/// Store a value under a key
#[derive(Debug, Clone)]
pub struct SetKeyRequest {
    pub key: Key,
    pub value: Value,
}

/// Fetch the value stored under a key
#[derive(Debug, Clone)]
pub struct GetKeyRequest {
    pub key: Key,
}

/// Remove a key
#[derive(Debug, Clone)]
pub struct DelKeyRequest {
    pub key: Key,
}

/// Replace the value of an existing key
#[derive(Debug, Clone)]
pub struct UpdKeyRequest {
    pub key: Key,
    pub value: Value,
}

/// Swap in `exchange` if the stored value equals `comparand`
#[derive(Debug, Clone)]
pub struct CmpxchgKeyRequest {
    pub key: Key,
    pub exchange: Value,
    pub comparand: Value,
}

impl Request for SetKeyRequest {
    const PACKET_TYPE: PacketType = PacketType::SetKey;
    const BODY_SIZE: usize = KEY_SIZE + VALUE_SIZE;
    type Response = SetKeyResponse;

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.key.as_bytes());
        buf.put_slice(self.value.as_bytes());
    }
}

impl Request for GetKeyRequest {
    const PACKET_TYPE: PacketType = PacketType::GetKey;
    const BODY_SIZE: usize = KEY_SIZE;
    type Response = GetKeyResponse;

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.key.as_bytes());
    }
}

impl Request for DelKeyRequest {
    const PACKET_TYPE: PacketType = PacketType::DelKey;
    const BODY_SIZE: usize = KEY_SIZE;
    type Response = DelKeyResponse;

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.key.as_bytes());
    }
}

impl Request for UpdKeyRequest {
    const PACKET_TYPE: PacketType = PacketType::UpdKey;
    const BODY_SIZE: usize = KEY_SIZE + VALUE_SIZE;
    type Response = UpdKeyResponse;

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.key.as_bytes());
        buf.put_slice(self.value.as_bytes());
    }
}

impl Request for CmpxchgKeyRequest {
    const PACKET_TYPE: PacketType = PacketType::CmpxchgKey;
    const BODY_SIZE: usize = KEY_SIZE + 2 * VALUE_SIZE;
    type Response = CmpxchgKeyResponse;

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_slice(self.key.as_bytes());
        buf.put_slice(self.exchange.as_bytes());
        buf.put_slice(self.comparand.as_bytes());
    }
}
