//! Response payloads
//!
//! Bodies longer than the fixed layout are accepted and the tail ignored;
//! shorter ones fail to decode.

use bytes::Buf;

use super::field::Value;
use super::header::VALUE_SIZE;
use crate::error::{DmapError, Result};

/// Body size of the set/del/upd acknowledgements
pub const PADDING_SIZE: usize = 8;

/// A typed response body
pub trait Response: Sized {
    /// Minimum body size in bytes
    const BODY_SIZE: usize;

    /// Decode a success body
    fn decode_body(body: &[u8]) -> Result<Self>;
}

/// The first `size` bytes of `body`, or a decode error if it is shorter
fn fixed_prefix(body: &[u8], size: usize) -> Result<&[u8]> {
    body.get(..size).ok_or_else(|| {
        DmapError::Decode(format!(
            "Incomplete response body: expected {} bytes, got {}",
            size,
            body.len()
        ))
    })
}

/// Acknowledgement of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetKeyResponse {
    pub padding: u64,
}

/// Value stored under the requested key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetKeyResponse {
    pub value: Value,
}

/// Acknowledgement of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelKeyResponse {
    pub padding: u64,
}

/// Acknowledgement of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdKeyResponse {
    pub padding: u64,
}

/// Value stored before the compare-and-exchange ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmpxchgKeyResponse {
    pub value: Value,
}

impl Response for SetKeyResponse {
    const BODY_SIZE: usize = PADDING_SIZE;

    fn decode_body(body: &[u8]) -> Result<Self> {
        let mut buf = fixed_prefix(body, Self::BODY_SIZE)?;
        Ok(Self { padding: buf.get_u64_le() })
    }
}

impl Response for GetKeyResponse {
    const BODY_SIZE: usize = VALUE_SIZE;

    fn decode_body(body: &[u8]) -> Result<Self> {
        Ok(Self { value: read_value(body)? })
    }
}

impl Response for DelKeyResponse {
    const BODY_SIZE: usize = PADDING_SIZE;

    fn decode_body(body: &[u8]) -> Result<Self> {
        let mut buf = fixed_prefix(body, Self::BODY_SIZE)?;
        Ok(Self { padding: buf.get_u64_le() })
    }
}

impl Response for UpdKeyResponse {
    const BODY_SIZE: usize = PADDING_SIZE;

    fn decode_body(body: &[u8]) -> Result<Self> {
        let mut buf = fixed_prefix(body, Self::BODY_SIZE)?;
        Ok(Self { padding: buf.get_u64_le() })
    }
}

impl Response for CmpxchgKeyResponse {
    const BODY_SIZE: usize = VALUE_SIZE;

    fn decode_body(body: &[u8]) -> Result<Self> {
        Ok(Self { value: read_value(body)? })
    }
}

fn read_value(body: &[u8]) -> Result<Value> {
    let raw = fixed_prefix(body, VALUE_SIZE)?;
    Value::read_from(raw).ok_or_else(|| DmapError::Decode("Malformed value field".to_string()))
}
