//! Observable application state types.
//!
//! These structures are the view model: the display string, the tracked
//! letters and where they come from, and the peer link status.

use std::collections::BTreeMap;

use timeflies_core::Marker;

/// Markers keyed by character index.
///
/// Entries are only ever inserted or overwritten while a source is active.
pub type LetterMap = BTreeMap<usize, Marker>;

/// Display string, either shown or being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayText {
    /// Text is displayed.
    Showing(String),
    /// Text is in the edit buffer.
    Editing(String),
}

impl DisplayText {
    /// Current text regardless of tag.
    pub fn text(&self) -> &str {
        match self {
            Self::Showing(text) | Self::Editing(text) => text,
        }
    }

    /// True while the text is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

impl Default for DisplayText {
    fn default() -> Self {
        Self::Showing(String::new())
    }
}

/// Where tracked letters come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LetterSource {
    /// Tracking is off.
    #[default]
    Disabled,
    /// Markers sampled from this client's pointer.
    Local(LetterMap),
    /// Markers mirrored through the echo peer.
    Remote(LetterMap),
}

impl LetterSource {
    /// Tag of this source without its markers.
    pub fn mode(&self) -> TrackingMode {
        match self {
            Self::Disabled => TrackingMode::Disabled,
            Self::Local(_) => TrackingMode::Local,
            Self::Remote(_) => TrackingMode::Remote,
        }
    }

    /// Accumulated markers. `None` while disabled.
    pub fn markers(&self) -> Option<&LetterMap> {
        match self {
            Self::Disabled => None,
            Self::Local(markers) | Self::Remote(markers) => Some(markers),
        }
    }
}

/// Tag of a [`LetterSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingMode {
    /// Tracking is off.
    Disabled,
    /// Local pointer tracking.
    Local,
    /// Tracking mirrored through the echo peer.
    Remote,
}

/// Echo peer link status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeerState {
    /// No link held.
    #[default]
    Offline,
    /// Link established.
    Online,
}
