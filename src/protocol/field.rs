//! Fixed-capacity wire fields
//!
//! Keys and values travel as fixed-width, zero-padded byte arrays. A logical
//! value is copied into the low-order bytes and the rest stays zero; the full
//! width is always transmitted.
//!
//! The padding is not self-describing: `b"ab"` and `b"ab\0"` encode to the
//! same field. Nothing here trims on the way back in. [`FixedField::trimmed`]
//! is an opt-in view for callers that know their values never end in zero
//! bytes.

use std::fmt;

use super::header::{KEY_SIZE, VALUE_SIZE};
use crate::error::{DmapError, Result};

/// A byte field of constant width `N`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedField<const N: usize>([u8; N]);

/// 16-byte key field
pub type Key = FixedField<KEY_SIZE>;

/// 4096-byte value field
pub type Value = FixedField<VALUE_SIZE>;

impl<const N: usize> FixedField<N> {
    /// Field width in bytes
    pub const CAPACITY: usize = N;

    /// An all-zero field
    pub fn zeroed() -> Self {
        Self([0u8; N])
    }

    /// Zero-fill the field and copy `bytes` into its start
    ///
    /// `name` only labels the error when `bytes` is longer than `N`.
    pub fn from_arg(name: &str, bytes: &[u8]) -> Result<Self> {
        if bytes.len() > N {
            return Err(DmapError::Argument(format!(
                "{} too big: {} bytes (max {})",
                name,
                bytes.len(),
                N
            )));
        }

        let mut field = Self::zeroed();
        field.0[..bytes.len()].copy_from_slice(bytes);
        Ok(field)
    }

    /// Read a field from the start of `bytes`
    pub(crate) fn read_from(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; N] = bytes.get(..N)?.try_into().ok()?;
        Some(Self(raw))
    }

    /// The full field, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The field with trailing zero bytes removed
    pub fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        &self.0[..end]
    }

    pub fn into_inner(self) -> [u8; N] {
        self.0
    }
}

impl<const N: usize> Default for FixedField<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedField<N> {
    type Error = DmapError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_arg("field", bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedField<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> fmt::Debug for FixedField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 4 KiB of padding is useless in logs
        write!(
            f,
            "FixedField<{}>({:?})",
            N,
            String::from_utf8_lossy(self.trimmed())
        )
    }
}
