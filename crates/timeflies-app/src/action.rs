//! Application side-effects and intents.
//!
//! [`AppAction`]s are instructions produced by the [`crate::App`] state
//! machine for the runtime to execute.

use timeflies_core::WireMessage;

use crate::MarkerRoute;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Replace the active marker stream with one for `text`.
    StartMarkers {
        /// Text whose characters are tracked.
        text: String,
        /// Where the stream's samples go.
        route: MarkerRoute,
    },

    /// Drop the active marker stream, cancelling pending delays.
    StopMarkers,

    /// Open the echo peer link.
    ConnectPeer,

    /// Close the echo peer link.
    DisconnectPeer,

    /// Fire-and-forget publish to the peer.
    Publish(WireMessage),
}
