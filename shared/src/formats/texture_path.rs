//! Fixed-size texture path field
//!
//! Each header slot is 256 bytes: up to 255 bytes of path followed by NUL
//! padding. An unset slot holds the single sentinel character `` ` ``.

use std::borrow::Cow;
use std::fmt;

use super::WobjFormatError;

/// Size of one path field in the header
pub const TEXTURE_PATH_LEN: usize = 256;

/// Longest path that still leaves room for the terminator
pub const TEXTURE_PATH_MAX: usize = TEXTURE_PATH_LEN - 1;

/// Placeholder meaning "no texture specified"
pub const SENTINEL: u8 = b'`';

/// A NUL-padded 256-byte texture path field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TexturePath([u8; TEXTURE_PATH_LEN]);

impl TexturePath {
    /// The sentinel value: one backtick, then NUL padding.
    pub const UNSET: Self = {
        let mut bytes = [0u8; TEXTURE_PATH_LEN];
        bytes[0] = SENTINEL;
        Self(bytes)
    };

    /// Build a field from a path, rejecting anything longer than 255 bytes.
    pub fn new(value: &str) -> Result<Self, WobjFormatError> {
        if value.len() > TEXTURE_PATH_MAX {
            return Err(WobjFormatError::PathTooLong {
                len: value.len(),
                max: TEXTURE_PATH_MAX,
            });
        }
        Self::from_checked(value)
    }

    /// Build a field from a path, cutting it at the last UTF-8 character
    /// boundary that fits in 255 bytes.
    pub fn truncated(value: &str) -> Result<Self, WobjFormatError> {
        let mut end = value.len().min(TEXTURE_PATH_MAX);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        Self::from_checked(&value[..end])
    }

    fn from_checked(value: &str) -> Result<Self, WobjFormatError> {
        if let Some(position) = value.bytes().position(|b| b == 0) {
            return Err(WobjFormatError::InteriorNul { position });
        }
        let mut bytes = [0u8; TEXTURE_PATH_LEN];
        bytes[..value.len()].copy_from_slice(value.as_bytes());
        Ok(Self(bytes))
    }

    /// Read a raw field. Returns `None` if fewer than 256 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; TEXTURE_PATH_LEN] = bytes.get(..TEXTURE_PATH_LEN)?.try_into().ok()?;
        Some(Self(raw))
    }

    /// The raw 256-byte field, padding included
    pub fn as_bytes(&self) -> &[u8; TEXTURE_PATH_LEN] {
        &self.0
    }

    /// Path bytes up to (not including) the first NUL
    pub fn value_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(TEXTURE_PATH_LEN);
        &self.0[..end]
    }

    /// Path as text (lossy for non-UTF-8 fields written by other tools)
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.value_bytes())
    }

    /// `true` if this slot holds the sentinel
    pub fn is_unset(&self) -> bool {
        self.value_bytes() == [SENTINEL]
    }
}

impl Default for TexturePath {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Debug for TexturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TexturePath").field(&self.as_str()).finish()
    }
}

impl fmt::Display for TexturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}
