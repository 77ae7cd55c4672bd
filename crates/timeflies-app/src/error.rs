//! Peer link errors.

use thiserror::Error;
use timeflies_core::WireError;

/// Errors publishing to or receiving from the echo peer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// Remote tracking is off, so there is no link to publish on.
    #[error("peer link is not connected")]
    NotConnected,

    /// The peer task has stopped.
    #[error("peer link closed")]
    Closed,

    /// The outbound queue is full; the message was dropped.
    #[error("peer link congested, dropped {kind}")]
    Congested {
        /// Kind of the dropped message.
        kind: &'static str,
    },

    /// Frame could not be encoded or decoded.
    #[error(transparent)]
    Wire(#[from] WireError),
}
