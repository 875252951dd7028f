//! Errors raised while building or parsing WOBJ data.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WobjFormatError {
    /// Texture path does not fit the 256-byte field (255 bytes + NUL)
    #[error("texture path is {len} bytes, maximum is {max}")]
    PathTooLong { len: usize, max: usize },

    /// Texture path contains a NUL byte, which would end the C string early
    #[error("texture path contains a NUL byte at position {position}")]
    InteriorNul { position: usize },

    /// Element count or offset does not fit the header's i32 fields
    #[error("{what} of {count} does not fit in a 32-bit header field")]
    CountOverflow { what: &'static str, count: usize },

    /// Buffer is shorter than the header says the file is
    #[error("container truncated: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Header holds a negative element count
    #[error("negative {what} in header: {value}")]
    NegativeCount { what: &'static str, value: i32 },

    /// Header section offset disagrees with the computed layout
    #[error("{what} is {actual}, expected {expected}")]
    OffsetMismatch {
        what: &'static str,
        expected: i32,
        actual: i32,
    },
}
