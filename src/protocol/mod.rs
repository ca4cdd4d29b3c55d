//! Protocol Module
//!
//! Defines the DMAP wire protocol.
//!
//! ## Packet Format
//! ```text
//! ┌───────────┬──────────┬──────────┬──────────┬──────────────────────┐
//! │ Magic (4) │ Type (4) │  Len (4) │Result (4)│   Body (Len bytes)   │
//! └───────────┴──────────┴──────────┴──────────┴──────────────────────┘
//! ```
//!
//! Magic is always `0xCBEECBEE`. A response echoes the request's type and
//! carries a nonzero result on failure.
//!
//! ### Bodies (request -> response)
//! - 4: SET     - key[16] + value[4096]                   -> padding[8]
//! - 5: GET     - key[16]                                 -> value[4096]
//! - 6: DEL     - key[16]                                 -> padding[8]
//! - 7: UPD     - key[16] + value[4096]                   -> padding[8]
//! - 8: CMPXCHG - key[16] + exchange[4096] + comparand[4096] -> value[4096]

mod header;
mod field;
mod request;
mod response;
mod codec;

pub use header::{
    Packet, PacketHeader, PacketType, HEADER_SIZE, KEY_SIZE, MAX_BODY_SIZE, PACKET_MAGIC,
    VALUE_SIZE,
};
pub use field::{FixedField, Key, Value};
pub use request::{
    CmpxchgKeyRequest, DelKeyRequest, GetKeyRequest, Request, SetKeyRequest, UpdKeyRequest,
};
pub use response::{
    CmpxchgKeyResponse, DelKeyResponse, GetKeyResponse, Response, SetKeyResponse,
    UpdKeyResponse, PADDING_SIZE,
};
pub use codec::{decode_header, decode_packet, encode_packet, read_packet, write_packet};
