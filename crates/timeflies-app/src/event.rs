//! Application input events.
//!
//! Events originate from three sources:
//! - the driver (keys, resize, pointer movement),
//! - the active marker stream,
//! - the echo peer link.

use timeflies_core::{Marker, Position, WireMessage};

use crate::{KeyInput, MarkerRoute};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resized; the next render uses the new frame.
    Resize,

    /// Pointer moved, in view units.
    PointerMoved(Position),

    /// A marker stream emitted a sample.
    MarkerSampled {
        /// Stream the sample came from.
        route: MarkerRoute,
        /// Character index.
        index: usize,
        /// Sampled marker.
        marker: Marker,
    },

    /// Message echoed by the peer.
    PeerMessage(WireMessage),

    /// Peer link established.
    PeerConnected,

    /// Peer link dropped.
    PeerDisconnected,

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
