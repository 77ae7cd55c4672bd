//! Pure state transition function.
//!
//! [`update`] is total over every message/state combination. Combinations
//! that have no meaning (a local marker while disabled, a live edit while
//! showing) return the model unchanged.

use timeflies_core::Marker;

use crate::state::{DisplayText, LetterMap, LetterSource};

/// Application model: display string plus tracked letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Where tracked letters come from.
    pub letters: LetterSource,
    /// The display string.
    pub text: DisplayText,
}

impl Model {
    /// Create a model showing `text` with tracking disabled.
    pub fn new(text: impl Into<String>) -> Self {
        Self { letters: LetterSource::Disabled, text: DisplayText::Showing(text.into()) }
    }
}

/// Messages accepted by [`update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start editing the shown text.
    RequestEdit,
    /// Live edit of the text being edited.
    EditedText(String),
    /// Finish editing with the given text.
    SubmitEdit(String),
    /// Toggle local pointer tracking.
    ToggleLocalTracking,
    /// Toggle tracking mirrored through the peer.
    ToggleRemoteTracking,
    /// Marker sampled locally.
    MarkerObserved {
        /// Character index.
        index: usize,
        /// Sampled marker.
        marker: Marker,
    },
    /// Marker echoed by the peer.
    RemoteMarkerObserved {
        /// Character index.
        index: usize,
        /// Echoed marker.
        marker: Marker,
    },
    /// Text echoed by the peer.
    RemoteTextChanged(String),
}

/// Apply `msg` to `model`.
pub fn update(msg: Msg, model: Model) -> Model {
    let Model { letters, text } = model;

    match msg {
        Msg::RequestEdit => {
            let text = match text {
                DisplayText::Showing(s) => DisplayText::Editing(s),
                editing @ DisplayText::Editing(_) => editing,
            };
            Model { letters, text }
        },
        Msg::EditedText(t) => {
            let text = match text {
                DisplayText::Editing(_) => DisplayText::Editing(t),
                showing @ DisplayText::Showing(_) => showing,
            };
            Model { letters, text }
        },
        Msg::SubmitEdit(t) => Model { letters, text: DisplayText::Showing(t) },
        Msg::ToggleLocalTracking => {
            let letters = match letters {
                LetterSource::Disabled => LetterSource::Local(LetterMap::new()),
                LetterSource::Remote(markers) => LetterSource::Local(markers),
                LetterSource::Local(_) => LetterSource::Disabled,
            };
            Model { letters, text }
        },
        Msg::ToggleRemoteTracking => {
            let letters = match letters {
                LetterSource::Disabled => LetterSource::Remote(LetterMap::new()),
                LetterSource::Local(markers) => LetterSource::Remote(markers),
                LetterSource::Remote(_) => LetterSource::Disabled,
            };
            Model { letters, text }
        },
        Msg::MarkerObserved { index, marker } => {
            let letters = match letters {
                LetterSource::Local(mut markers) => {
                    markers.insert(index, marker);
                    LetterSource::Local(markers)
                },
                other => other,
            };
            Model { letters, text }
        },
        Msg::RemoteMarkerObserved { index, marker } => {
            let letters = match letters {
                LetterSource::Remote(mut markers) => {
                    markers.insert(index, marker);
                    LetterSource::Remote(markers)
                },
                other => other,
            };
            Model { letters, text }
        },
        Msg::RemoteTextChanged(t) => {
            let text = match text {
                DisplayText::Showing(_) => DisplayText::Showing(t),
                DisplayText::Editing(_) => DisplayText::Editing(t),
            };
            Model { letters, text }
        },
    }
}
