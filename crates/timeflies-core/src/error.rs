//! Wire codec errors.

use thiserror::Error;

/// Errors produced while encoding or decoding peer frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// CBOR serialization failed.
    #[error("CBOR encode failed: {0}")]
    Encode(String),

    /// CBOR deserialization failed.
    #[error("CBOR decode failed: {0}")]
    Decode(String),

    /// Frame exceeds [`crate::wire::MAX_FRAME_LEN`].
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge {
        /// Actual frame length in bytes.
        len: usize,
        /// Maximum accepted frame length in bytes.
        max: usize,
    },
}
