//! Peer wire messages.
//!
//! In remote mode every text submission and every sampled marker is published
//! to the echo peer as a [`WireMessage`]. What the peer sends back is what
//! ends up rendered.
//!
//! Frames are CBOR-encoded with a hard size limit enforced in both
//! directions.

use serde::{Deserialize, Serialize};

use crate::{Marker, WireError};

/// Maximum encoded frame length (64 KiB).
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Messages exchanged with the remote peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMessage {
    /// The display string was submitted.
    TextChanged {
        /// New display string.
        text: String,
    },

    /// A marker was sampled for the character at `index`.
    MarkerObserved {
        /// Character index in the display string.
        index: usize,
        /// Sampled marker.
        marker: Marker,
    },
}

impl WireMessage {
    /// Short name of the message kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextChanged { .. } => "text_changed",
            Self::MarkerObserved { .. } => "marker_observed",
        }
    }

    /// Encode into a CBOR frame.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut frame = Vec::new();
        ciborium::ser::into_writer(self, &mut frame)
            .map_err(|e| WireError::Encode(e.to_string()))?;

        if frame.len() > MAX_FRAME_LEN {
            return Err(WireError::FrameTooLarge { len: frame.len(), max: MAX_FRAME_LEN });
        }
        Ok(frame)
    }

    /// Decode a CBOR frame.
    pub fn decode(frame: &[u8]) -> Result<Self, WireError> {
        if frame.len() > MAX_FRAME_LEN {
            return Err(WireError::FrameTooLarge { len: frame.len(), max: MAX_FRAME_LEN });
        }
        ciborium::de::from_reader(frame).map_err(|e| WireError::Decode(e.to_string()))
    }
}
